//! Resumable store for harvested documents
//!
//! The destination directory is the only persistent state:
//! - `<dir>/<region_code>.csv` holds a region's listing snapshot
//! - `<dir>/<item_id>` holds one raw detail document
//!
//! A detail file's presence means "already fetched"; its absence means the
//! item still needs fetching. There is no other checkpoint.

mod directory;
mod listing_file;
mod traits;

pub use directory::DirectoryStore;
pub use listing_file::parse_listing_urls;
pub use traits::{Store, StoreError, StoreResult};

/// File name of a region's listing snapshot
pub fn listing_file_name(region_code: u32) -> String {
    format!("{}.csv", region_code)
}
