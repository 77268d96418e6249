//! Harvest module: the two-stage pipeline
//!
//! This module contains the harvesting logic, including:
//! - HTTP fetching with a fixed browser identity
//! - Randomized pacing between requests
//! - Listing query construction
//! - The listing and detail stages
//!
//! The stages are independent: the detail stage only needs listing files to
//! exist in the destination directory, so the two can run on different days.
//! Execution is strictly sequential, one request at a time.

mod detail;
mod fetcher;
mod listing;
mod pacer;
mod query;

pub use detail::DetailHarvester;
pub use fetcher::{build_http_client, fetch_url, FetchResult, Fetcher, HttpFetcher, Timeouts};
pub use listing::ListingHarvester;
pub use pacer::{PaceKind, Pacer, RandomPacer};
pub use query::Query;

use crate::config::Config;
use crate::output::{HarvestReport, ListingReport};
use crate::store::DirectoryStore;
use crate::HarvestError;
use std::path::Path;

/// Harvests listing snapshots for every configured region into `dest`
///
/// # Arguments
///
/// * `config` - Regions, query parameters, fetch profile and pacing
/// * `dest` - Existing, writable destination directory
/// * `lookback_days` - Sold-within window of the query
///
/// # Returns
///
/// * `Ok(ListingReport)` - Every region was attempted
/// * `Err(HarvestError)` - Setup failed or a listing file could not be written
pub async fn harvest_listings(
    config: &Config,
    dest: &Path,
    lookback_days: u32,
) -> Result<ListingReport, HarvestError> {
    ensure_destination(dest)?;

    let fetcher = HttpFetcher::new(&config.fetch)?;
    let pacer = RandomPacer::new(config.pacing.clone());
    let store = DirectoryStore::new(dest);

    tracing::info!(
        "Harvesting listings for {} regions (sold within {} days) into {}",
        config.regions.len(),
        lookback_days,
        dest.display()
    );

    ListingHarvester::new(config, lookback_days, fetcher, pacer, store)
        .run()
        .await
}

/// Harvests the detail pages referenced by the listing files in `dest`
///
/// Pages already present in `dest` are not fetched again, so an interrupted
/// run is resumed by calling this again.
pub async fn harvest_details(config: &Config, dest: &Path) -> Result<HarvestReport, HarvestError> {
    ensure_destination(dest)?;

    let fetcher = HttpFetcher::new(&config.fetch)?;
    let pacer = RandomPacer::new(config.pacing.clone());
    let store = DirectoryStore::new(dest);

    tracing::info!("Harvesting detail pages into {}", dest.display());

    Ok(DetailHarvester::new(config, fetcher, pacer, store).run().await)
}

fn ensure_destination(dest: &Path) -> Result<(), HarvestError> {
    if dest.is_dir() {
        Ok(())
    } else {
        Err(HarvestError::MissingDestination(dest.to_path_buf()))
    }
}
