//! Integration tests for Home-Harvest

mod fetcher_tests;
mod listing_tests;
