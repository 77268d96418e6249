//! Configuration module for Home-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; anything left out falls back to the built-in
//! policy (nine Santa Clara County cities, browser header profile, 4s/10s
//! timeouts and the 10-30s / 5-15s pacing windows).
//!
//! # Example
//!
//! ```no_run
//! use home_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Harvesting {} regions", config.regions.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, DetailConfig, FetchConfig, ListingConfig, PacingConfig, Region, RegionKind,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::{validate, MAX_DELAY_SECS};
