//! Detail stage: fetch every page referenced by the listing snapshots

use crate::config::{Config, DetailConfig, Region};
use crate::harvest::fetcher::{FetchResult, Fetcher};
use crate::harvest::pacer::{PaceKind, Pacer};
use crate::output::{HarvestReport, RegionStats};
use crate::state::DetailState;
use crate::store::{Store, StoreError};
use crate::url::extract_id;
use std::time::Instant;

/// Fetches detail pages region by region, resuming from what is stored
///
/// Items whose identifier already exists in the store are skipped without a
/// request or a delay. Everything else is fetched once, written on HTTP 200,
/// and followed by a detail delay whatever the outcome.
pub struct DetailHarvester<F, P, S> {
    regions: Vec<Region>,
    detail: DetailConfig,
    fetcher: F,
    pacer: P,
    store: S,
}

impl<F: Fetcher, P: Pacer, S: Store> DetailHarvester<F, P, S> {
    pub fn new(config: &Config, fetcher: F, pacer: P, store: S) -> Self {
        Self {
            regions: config.regions.clone(),
            detail: config.detail.clone(),
            fetcher,
            pacer,
            store,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs the detail stage over every configured region
    ///
    /// Per-item and per-region failures are counted and logged, never
    /// returned.
    pub async fn run(&mut self) -> HarvestReport {
        let start = Instant::now();
        let regions = self.regions.clone();
        let mut stats = Vec::with_capacity(regions.len());

        for region in &regions {
            stats.push(self.harvest_region(region).await);
        }

        let report = HarvestReport {
            regions: stats,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Total pages: {}; failed: {}; skipped: {}; took {:.2} hours",
            report.total(),
            report.failed(),
            report.skipped(),
            report.elapsed.as_secs_f64() / 3600.0
        );

        report
    }

    async fn harvest_region(&mut self, region: &Region) -> RegionStats {
        let mut stats = RegionStats::new(region);

        let urls = match self.store.read_list_file(region, self.detail.url_column) {
            Ok(urls) => urls,
            Err(StoreError::ListingNotFound(path)) => {
                tracing::warn!("No listing file for {} at {}", region.name, path.display());
                stats.listing_available = false;
                return stats;
            }
            Err(e) => {
                tracing::error!("Cannot read listing for {}: {}", region.name, e);
                stats.listing_available = false;
                return stats;
            }
        };

        tracing::info!("{}: {} pages to download", region.name, urls.len());
        stats.total = urls.len() as u64;

        for url in &urls {
            let (state, requested) = self.harvest_item(url).await;
            if requested {
                stats.requests += 1;
            }
            stats.record(state);
        }

        tracing::info!(
            "{}: fetched {}, failed {}, skipped {}",
            region.name,
            stats.fetched,
            stats.failed,
            stats.skipped
        );

        stats
    }

    /// Resolves one item to a terminal state; the flag is true when a
    /// request was sent
    async fn harvest_item(&mut self, url: &str) -> (DetailState, bool) {
        let Some(id) = extract_id(url) else {
            tracing::warn!("No identifier in detail URL '{}', not fetching", url);
            return (DetailState::Failed, false);
        };

        if self.detail.skip_existing && self.store.exists(&id) {
            tracing::debug!("{} is downloaded, skipping", id);
            return (DetailState::Skipped, false);
        }

        tracing::debug!("Downloading {}", url);
        let result = self.fetcher.fetch(url).await;

        let state = match result {
            FetchResult::Response {
                status_code: 200,
                ref body,
            } => match self.store.write(&id, body) {
                Ok(()) => DetailState::Succeeded,
                Err(e) => {
                    tracing::error!("Failed to save {}: {}", id, e);
                    DetailState::Failed
                }
            },
            FetchResult::Response { status_code, .. } => {
                tracing::warn!("Download failed for {} (status {})", url, status_code);
                DetailState::Failed
            }
            FetchResult::Timeout | FetchResult::NetworkError { .. } => {
                tracing::warn!("Download failed for {}: no response", url);
                DetailState::Failed
            }
        };

        tracing::debug!("{} {}", id, state);
        self.pacer.delay(PaceKind::Detail).await;

        (state, true)
    }
}
