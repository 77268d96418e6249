//! Output module for harvest reports
//!
//! This module handles:
//! - Per-region and aggregate counters of a detail harvest
//! - Per-region outcomes of a listing harvest
//! - Printing both as a human-readable summary

pub mod stats;

pub use stats::{
    format_elapsed, print_harvest_report, print_listing_report, HarvestReport, ListingOutcome,
    ListingReport, RegionStats,
};
