//! Home-Harvest: a paced, resumable listing harvester
//!
//! This crate harvests sold-home listing snapshots for a fixed set of regions
//! and then crawls every detail page those listings reference, storing each
//! page under an identifier taken from its URL. Re-running the detail stage
//! against the same directory only fetches what is still missing.

pub mod config;
pub mod harvest;
pub mod output;
pub mod state;
pub mod store;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Home-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Destination directory does not exist: {0}")]
    MissingDestination(PathBuf),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Home-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use harvest::{harvest_details, harvest_listings};
pub use output::{HarvestReport, ListingReport, RegionStats};
pub use state::DetailState;
pub use crate::url::extract_id;
