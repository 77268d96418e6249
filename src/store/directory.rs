//! Filesystem implementation of the Store trait

use crate::config::Region;
use crate::store::listing_file::parse_listing_urls;
use crate::store::listing_file_name;
use crate::store::traits::{Store, StoreError, StoreResult};
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// Store rooted at a single destination directory
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path of the entry `name`
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Store for DirectoryStore {
    fn exists(&self, id: &str) -> bool {
        self.path_of(id).is_file()
    }

    fn read_list_file(&self, region: &Region, url_column: usize) -> StoreResult<Vec<String>> {
        let path = self.path_of(&listing_file_name(region.code));

        let file = File::open(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::ListingNotFound(path.clone())
            } else {
                StoreError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        parse_listing_urls(file, url_column).map_err(|source| StoreError::Csv { path, source })
    }

    fn write(&self, name: &str, content: &str) -> StoreResult<()> {
        let target = self.path_of(name);

        // Staged under a fixed-length temporary name in the same directory,
        // then renamed; the temporary is removed on drop if anything fails
        let mut staged = NamedTempFile::new_in(&self.root).map_err(|source| StoreError::Io {
            path: self.root.clone(),
            source,
        })?;

        staged
            .write_all(content.as_bytes())
            .and_then(|()| staged.flush())
            .map_err(|source| StoreError::Io {
                path: staged.path().to_path_buf(),
                source,
            })?;

        staged.persist(&target).map_err(|e| StoreError::Io {
            path: target.clone(),
            source: e.error,
        })?;

        Ok(())
    }
}
