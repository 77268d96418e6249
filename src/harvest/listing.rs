//! Listing stage: one CSV snapshot per region

use crate::config::{Config, ListingConfig, Region};
use crate::harvest::fetcher::Fetcher;
use crate::harvest::pacer::{PaceKind, Pacer};
use crate::harvest::query::Query;
use crate::output::{ListingOutcome, ListingReport};
use crate::store::{listing_file_name, Store};
use crate::HarvestError;
use std::time::Instant;

/// Fetches each region's listing snapshot into the store
///
/// Regions are visited in configuration order. A failed fetch never stops
/// the run; it is logged and reported in the region's [`ListingOutcome`].
pub struct ListingHarvester<F, P, S> {
    regions: Vec<Region>,
    listing: ListingConfig,
    lookback_days: u32,
    fetcher: F,
    pacer: P,
    store: S,
}

impl<F: Fetcher, P: Pacer, S: Store> ListingHarvester<F, P, S> {
    pub fn new(config: &Config, lookback_days: u32, fetcher: F, pacer: P, store: S) -> Self {
        Self {
            regions: config.regions.clone(),
            listing: config.listing.clone(),
            lookback_days,
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

    /// Harvests every region's listing
    ///
    /// # Returns
    ///
    /// * `Ok(ListingReport)` - One outcome per region, in order
    /// * `Err(HarvestError)` - A listing file could not be written
    pub async fn run(&mut self) -> Result<ListingReport, HarvestError> {
        let start = Instant::now();
        let regions = self.regions.clone();
        let mut outcomes = Vec::with_capacity(regions.len());

        for region in &regions {
            outcomes.push(self.harvest_region(region).await?);
        }

        let report = ListingReport {
            regions: outcomes,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Listing harvest finished: {} succeeded, {} failed in {:?}",
            report.succeeded(),
            report.failed(),
            report.elapsed
        );

        Ok(report)
    }

    async fn harvest_region(&mut self, region: &Region) -> Result<ListingOutcome, HarvestError> {
        let url = Query::new(region, &self.listing, self.lookback_days).to_url(&self.listing.endpoint)?;

        tracing::info!("Downloading listing for {}", region.name);
        tracing::debug!("Query URL: {}", url);

        let result = self.fetcher.fetch(url.as_str()).await;
        let success = result.is_success();
        if !success {
            tracing::warn!(
                "Listing query for {} failed (status: {:?})",
                region.name,
                result.status_code()
            );
        }

        // A failed fetch still lands under the normal file name unless
        // write-on-failure is off; the outcome keeps the two apart
        let file_name = listing_file_name(region.code);
        let bytes_written = if success || self.listing.write_on_failure {
            self.store.write(&file_name, result.body())?;
            tracing::info!("Saved {} ({} bytes)", file_name, result.body().len());
            Some(result.body().len())
        } else {
            None
        };

        self.pacer.delay(PaceKind::Listing).await;

        Ok(ListingOutcome {
            name: region.name.clone(),
            code: region.code,
            status_code: result.status_code(),
            bytes_written,
        })
    }
}
