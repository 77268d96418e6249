use serde::Deserialize;

/// Main configuration structure for Home-Harvest
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub pacing: PacingConfig,
    pub listing: ListingConfig,
    pub detail: DetailConfig,
    #[serde(rename = "region")]
    pub regions: Vec<Region>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            pacing: PacingConfig::default(),
            listing: ListingConfig::default(),
            detail: DetailConfig::default(),
            regions: default_regions(),
        }
    }
}

/// Request identity and timeouts used for every fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Time allowed to establish a connection (milliseconds)
    pub connect_timeout_ms: u64,

    /// Time allowed for the whole response to arrive (milliseconds)
    pub read_timeout_ms: u64,

    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub cache_control: String,
    pub upgrade_insecure_requests: String,

    /// Skip TLS certificate verification
    pub accept_invalid_certs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 4_000,
            read_timeout_ms: 10_000,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/56.0.2924.87 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8"
                .to_string(),
            accept_language: "en-GB,en;q=0.8,en-US;q=0.6,ml;q=0.4".to_string(),
            cache_control: "max-age=0".to_string(),
            upgrade_insecure_requests: "1".to_string(),
            accept_invalid_certs: true,
        }
    }
}

/// Randomized delay windows, in seconds
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PacingConfig {
    pub listing_min_secs: f64,
    pub listing_max_secs: f64,
    pub detail_min_secs: f64,
    pub detail_max_secs: f64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            listing_min_secs: 10.0,
            listing_max_secs: 30.0,
            detail_min_secs: 5.0,
            detail_max_secs: 15.0,
        }
    }
}

/// Listing query parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ListingConfig {
    /// Base URL of the CSV listing endpoint
    pub endpoint: String,

    pub market: String,

    /// Upper bound on rows returned per region. 5000 covers a 90 day window.
    pub max_results: u32,

    /// Comma-joined property kind codes, sent verbatim (1 = single family, 3 = townhouse)
    pub property_types: String,

    /// Write the response body to the region's listing file even when the fetch failed
    pub write_on_failure: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.redfin.com/stingray/api/gis-csv".to_string(),
            market: "sanfrancisco".to_string(),
            max_results: 5_000,
            property_types: "1,3".to_string(),
            write_on_failure: true,
        }
    }
}

/// Detail stage settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DetailConfig {
    /// Zero-based column holding the detail URL in listing files
    pub url_column: usize,

    /// Skip items whose output file already exists
    pub skip_existing: bool,
}

impl Default for DetailConfig {
    fn default() -> Self {
        Self {
            url_column: 20,
            skip_existing: true,
        }
    }
}

/// Kind of geographic place a region code refers to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    #[default]
    City,
}

impl RegionKind {
    /// Numeric code the listing endpoint expects for this kind
    pub fn code(&self) -> u32 {
        match self {
            Self::City => 6,
        }
    }
}

/// A named place whose listings are harvested
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Region {
    pub name: String,
    pub code: u32,
    #[serde(default)]
    pub kind: RegionKind,
}

impl Region {
    pub fn city(name: &str, code: u32) -> Self {
        Self {
            name: name.to_string(),
            code,
            kind: RegionKind::City,
        }
    }
}

fn default_regions() -> Vec<Region> {
    [
        ("San Jose", 17420),
        ("Milpitas", 12204),
        ("Campbell", 2673),
        ("Cupertino", 4561),
        ("Los Gatos", 11234),
        ("Mountain View", 12739),
        ("Santa Clara", 17675),
        ("Saratoga", 17960),
        ("Sunnyvale", 19457),
    ]
    .into_iter()
    .map(|(name, code)| Region::city(name, code))
    .collect()
}
