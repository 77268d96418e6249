use crate::config::types::{Config, DetailConfig, FetchConfig, ListingConfig, PacingConfig, Region};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_pacing_config(&config.pacing)?;
    validate_listing_config(&config.listing)?;
    validate_detail_config(&config.detail)?;
    validate_regions(&config.regions)?;
    Ok(())
}

/// Validates timeouts and the header profile
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.connect_timeout_ms == 0 || config.read_timeout_ms == 0 {
        return Err(ConfigError::Validation(format!(
            "timeouts must be > 0ms, got connect={}ms read={}ms",
            config.connect_timeout_ms, config.read_timeout_ms
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates both delay windows
fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    validate_delay_window("listing", config.listing_min_secs, config.listing_max_secs)?;
    validate_delay_window("detail", config.detail_min_secs, config.detail_max_secs)?;
    Ok(())
}

/// Longest delay accepted in either window, in seconds (one day)
pub const MAX_DELAY_SECS: f64 = 86_400.0;

fn validate_delay_window(kind: &str, min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 {
        return Err(ConfigError::Validation(format!(
            "{} delay window must be finite and non-negative, got [{}, {}]",
            kind, min, max
        )));
    }

    if min > max {
        return Err(ConfigError::Validation(format!(
            "{} delay minimum {}s exceeds maximum {}s",
            kind, min, max
        )));
    }

    if max > MAX_DELAY_SECS {
        return Err(ConfigError::Validation(format!(
            "{} delay maximum {}s exceeds the {}s limit",
            kind, max, MAX_DELAY_SECS
        )));
    }

    Ok(())
}

/// Validates the listing query parameters
fn validate_listing_config(config: &ListingConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint: {}", e)))?;

    if !matches!(endpoint.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(format!(
            "Endpoint '{}' must use http or https",
            config.endpoint
        )));
    }

    if config.max_results < 1 {
        return Err(ConfigError::Validation(
            "max-results must be >= 1".to_string(),
        ));
    }

    if config.market.is_empty() {
        return Err(ConfigError::Validation("market cannot be empty".to_string()));
    }

    validate_property_types(&config.property_types)
}

/// Property kinds are sent verbatim, so they must already be a clean
/// comma-joined list of positive integers
fn validate_property_types(types: &str) -> Result<(), ConfigError> {
    let valid = !types.is_empty()
        && types
            .split(',')
            .all(|code| code.parse::<u32>().map(|n| n > 0).unwrap_or(false));

    if !valid {
        return Err(ConfigError::Validation(format!(
            "property-types must be comma-joined positive integers, got '{}'",
            types
        )));
    }

    Ok(())
}

fn validate_detail_config(config: &DetailConfig) -> Result<(), ConfigError> {
    // Anything past a few hundred columns is a typo, not a schema
    if config.url_column > 512 {
        return Err(ConfigError::Validation(format!(
            "url-column {} is out of range",
            config.url_column
        )));
    }
    Ok(())
}

/// Validates the region table: non-empty, unique names and codes
fn validate_regions(regions: &[Region]) -> Result<(), ConfigError> {
    if regions.is_empty() {
        return Err(ConfigError::Validation(
            "at least one region must be configured".to_string(),
        ));
    }

    let mut names = HashSet::new();
    let mut codes = HashSet::new();

    for region in regions {
        if region.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "region name cannot be empty".to_string(),
            ));
        }

        if region.code == 0 {
            return Err(ConfigError::Validation(format!(
                "region '{}' must have a non-zero code",
                region.name
            )));
        }

        if !names.insert(region.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate region name '{}'",
                region.name
            )));
        }

        // Codes name the listing files, so two regions must never share one
        if !codes.insert(region.code) {
            return Err(ConfigError::Validation(format!(
                "duplicate region code {}",
                region.code
            )));
        }
    }

    Ok(())
}
