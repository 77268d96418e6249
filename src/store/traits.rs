//! Store trait and error types

use crate::config::Region;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Listing file not found: {0}")]
    ListingNotFound(PathBuf),

    #[error("Malformed listing file {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Durable storage for listing snapshots and detail documents
pub trait Store {
    /// Returns true iff an entry named exactly `id` is already stored
    fn exists(&self, id: &str) -> bool;

    /// Reads the detail URLs from a region's listing snapshot, in row order
    ///
    /// Only rows long enough to contain `url_column` count; of those the
    /// first is the header and is dropped.
    fn read_list_file(&self, region: &Region, url_column: usize) -> StoreResult<Vec<String>>;

    /// Creates or replaces the entry `name` with `content` (UTF-8)
    fn write(&self, name: &str, content: &str) -> StoreResult<()>;
}
