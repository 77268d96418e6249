//! Harvest statistics
//!
//! Counters are built during a run and reported at the end. Nothing here is
//! persisted; the store directory is the only durable record.

use crate::config::Region;
use crate::state::DetailState;
use std::time::Duration;

/// Detail harvest counters for one region
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionStats {
    pub name: String,
    pub code: u32,

    /// Items read from the listing file
    pub total: u64,

    /// Items fetched and written
    pub fetched: u64,

    /// Items that failed (bad status, transport error, unusable URL, write error)
    pub failed: u64,

    /// Items already present in the store
    pub skipped: u64,

    /// Requests actually sent
    pub requests: u64,

    /// False when the region's listing file could not be read
    pub listing_available: bool,
}

impl RegionStats {
    pub fn new(region: &Region) -> Self {
        Self {
            name: region.name.clone(),
            code: region.code,
            listing_available: true,
            ..Self::default()
        }
    }

    /// Counts one item that reached a terminal state
    pub fn record(&mut self, state: DetailState) {
        match state {
            DetailState::Succeeded => self.fetched += 1,
            DetailState::Failed => self.failed += 1,
            DetailState::Skipped => self.skipped += 1,
            DetailState::NotStarted => {}
        }
    }
}

/// Result of a detail harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestReport {
    pub regions: Vec<RegionStats>,
    pub elapsed: Duration,
}

impl HarvestReport {
    pub fn total(&self) -> u64 {
        self.regions.iter().map(|r| r.total).sum()
    }

    pub fn fetched(&self) -> u64 {
        self.regions.iter().map(|r| r.fetched).sum()
    }

    pub fn failed(&self) -> u64 {
        self.regions.iter().map(|r| r.failed).sum()
    }

    pub fn skipped(&self) -> u64 {
        self.regions.iter().map(|r| r.skipped).sum()
    }

    /// Requests sent across all regions; zero on a fully resumed run
    pub fn network_calls(&self) -> u64 {
        self.regions.iter().map(|r| r.requests).sum()
    }

    pub fn region(&self, code: u32) -> Option<&RegionStats> {
        self.regions.iter().find(|r| r.code == code)
    }
}

/// Outcome of one region's listing fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingOutcome {
    pub name: String,
    pub code: u32,

    /// HTTP status, `None` on timeout or transport failure
    pub status_code: Option<u16>,

    /// Bytes written to the listing file, `None` if nothing was written
    pub bytes_written: Option<usize>,
}

impl ListingOutcome {
    pub fn is_success(&self) -> bool {
        self.status_code == Some(200)
    }
}

/// Result of a listing harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingReport {
    pub regions: Vec<ListingOutcome>,
    pub elapsed: Duration,
}

impl ListingReport {
    pub fn succeeded(&self) -> usize {
        self.regions.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.regions.len() - self.succeeded()
    }
}

/// Formats a duration as `1h 02m 03s`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {:02}m {:02}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Prints a detail harvest report to stdout
pub fn print_harvest_report(report: &HarvestReport) {
    println!("=== Detail Harvest ===\n");

    for region in &report.regions {
        if !region.listing_available {
            println!("  {} ({}): listing file unavailable", region.name, region.code);
            continue;
        }
        println!(
            "  {} ({}): {} pages, {} fetched, {} failed, {} skipped",
            region.name, region.code, region.total, region.fetched, region.failed, region.skipped
        );
    }
    println!();

    println!(
        "Total: {} pages, {} fetched, {} failed, {} skipped ({} requests)",
        report.total(),
        report.fetched(),
        report.failed(),
        report.skipped(),
        report.network_calls()
    );
    println!("Elapsed: {}", format_elapsed(report.elapsed));
}

/// Prints a listing harvest report to stdout
pub fn print_listing_report(report: &ListingReport) {
    println!("=== Listing Harvest ===\n");

    for region in &report.regions {
        let status = region
            .status_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "no response".to_string());
        let written = region
            .bytes_written
            .map(|bytes| format!("{} bytes written", bytes))
            .unwrap_or_else(|| "not written".to_string());
        let marker = if region.is_success() { "ok" } else { "FAILED" };
        println!(
            "  {} ({}): {} [{}], {}",
            region.name, region.code, marker, status, written
        );
    }
    println!();

    println!(
        "Regions: {} succeeded, {} failed",
        report.succeeded(),
        report.failed()
    );
    println!("Elapsed: {}", format_elapsed(report.elapsed));
}
