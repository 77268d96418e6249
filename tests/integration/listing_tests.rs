//! Listing stage tests, and the two stages chained

use crate::common::*;
use home_harvest::config::Region;
use home_harvest::harvest::{DetailHarvester, FetchResult, ListingHarvester, PaceKind, Query};
use home_harvest::store::DirectoryStore;
use std::fs;
use tempfile::TempDir;

fn two_regions() -> Vec<Region> {
    vec![
        Region::city("San Jose", 17420),
        Region::city("Milpitas", 12204),
    ]
}

fn query_url(region: &Region, days: u32) -> String {
    let config = test_config(vec![]);
    Query::new(region, &config.listing, days)
        .to_url(&config.listing.endpoint)
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_listing_written_per_region_in_order() {
    let dir = TempDir::new().unwrap();
    let regions = two_regions();
    let fetcher = ScriptedFetcher::new()
        .respond(&query_url(&regions[0], 90), 200, "san jose csv")
        .respond(&query_url(&regions[1], 90), 200, "milpitas csv");

    let config = test_config(regions.clone());
    let mut harvester = ListingHarvester::new(
        &config,
        90,
        fetcher,
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    let report = harvester.run().await.unwrap();

    assert_eq!(report.succeeded(), 2);
    assert_eq!(
        fs::read_to_string(dir.path().join("17420.csv")).unwrap(),
        "san jose csv"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("12204.csv")).unwrap(),
        "milpitas csv"
    );

    let calls = harvester.fetcher().calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("region_id=17420"));
    assert!(calls[1].contains("region_id=12204"));
    assert!(calls[0].contains("sold_within_days=90"));
    assert!(calls[0].contains("num_homes=5000"));
    assert!(calls[0].contains("uipt=1,3"));
    assert_eq!(harvester.pacer().delays, vec![PaceKind::Listing; 2]);
}

#[tokio::test]
async fn test_failed_region_does_not_stop_run() {
    let dir = TempDir::new().unwrap();
    let regions = two_regions();
    let fetcher = ScriptedFetcher::new()
        .respond(&query_url(&regions[0], 30), 503, "Service Unavailable")
        .respond(&query_url(&regions[1], 30), 200, "milpitas csv");

    let config = test_config(regions.clone());
    let mut harvester = ListingHarvester::new(
        &config,
        30,
        fetcher,
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    let report = harvester.run().await.unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.regions[0].status_code, Some(503));
    assert!(!report.regions[0].is_success());

    // The failed body still lands under the region's file name
    assert_eq!(
        fs::read_to_string(dir.path().join("17420.csv")).unwrap(),
        "Service Unavailable"
    );
    assert_eq!(report.regions[0].bytes_written, Some(19));
    assert_eq!(harvester.pacer().delays.len(), 2);
}

#[tokio::test]
async fn test_transport_failure_writes_empty_listing() {
    let dir = TempDir::new().unwrap();
    let config = test_config(vec![Region::city("Saratoga", 17960)]);

    let mut harvester = ListingHarvester::new(
        &config,
        90,
        ScriptedFetcher::new(),
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    let report = harvester.run().await.unwrap();

    assert_eq!(report.regions[0].status_code, None);
    assert_eq!(fs::read_to_string(dir.path().join("17960.csv")).unwrap(), "");
    assert_eq!(harvester.pacer().delays, vec![PaceKind::Listing]);
}

#[tokio::test]
async fn test_failed_listing_not_written_when_disabled() {
    let dir = TempDir::new().unwrap();
    let regions = two_regions();
    let fetcher = ScriptedFetcher::new()
        .fail(&query_url(&regions[0], 90), FetchResult::Timeout)
        .respond(&query_url(&regions[1], 90), 200, "milpitas csv");

    let mut config = test_config(regions.clone());
    config.listing.write_on_failure = false;

    let mut harvester = ListingHarvester::new(
        &config,
        90,
        fetcher,
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    let report = harvester.run().await.unwrap();

    assert_eq!(report.regions[0].bytes_written, None);
    assert!(!dir.path().join("17420.csv").exists());
    assert!(dir.path().join("12204.csv").exists());
    assert_eq!(harvester.pacer().delays.len(), 2);
}

#[tokio::test]
async fn test_listing_then_details() {
    let dir = TempDir::new().unwrap();
    let region = Region::city("Cupertino", 4561);
    let home = "https://www.redfin.com/CA/Cupertino/1-Infinite-Loop-95014/home/4242";

    let config = test_config(vec![region.clone()]);

    let mut listings = ListingHarvester::new(
        &config,
        90,
        ScriptedFetcher::new().respond(&query_url(&region, 90), 200, &listing_csv(&[home])),
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    listings.run().await.unwrap();

    let mut details = DetailHarvester::new(
        &config,
        ScriptedFetcher::new().respond(home, 200, "<html>home</html>"),
        RecordingPacer::default(),
        DirectoryStore::new(dir.path()),
    );
    let report = details.run().await;

    assert_eq!(report.total(), 1);
    assert_eq!(report.fetched(), 1);
    assert_eq!(
        fs::read_to_string(dir.path().join("4242")).unwrap(),
        "<html>home</html>"
    );
}
