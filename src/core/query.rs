//! Read-through state predicates over the metadata cache.
//!
//! Every predicate may trigger a `describe` call when the cached record is missing or
//! stale, so each one returns a [`Result`]. Callers deciding whether a command is enabled
//! must treat an error as "not enabled".

use crate::core::{cache::MetadataCache, error::Result};
use std::path::Path;

pub struct StateQuery<'c> {
    cache: &'c mut MetadataCache,
}

impl<'c> StateQuery<'c> {
    pub fn new(cache: &'c mut MetadataCache) -> Self {
        Self { cache }
    }

    pub fn is_checked_out(&mut self, path: &Path) -> Result<bool> {
        Ok(self.cache.get(path)?.is_checked_out())
    }

    pub fn is_checked_in(&mut self, path: &Path) -> Result<bool> {
        Ok(self.cache.get(path)?.is_checked_in())
    }

    pub fn is_private(&mut self, path: &Path) -> Result<bool> {
        Ok(self.cache.get(path)?.is_private)
    }

    pub fn is_in_managed_view(&mut self, path: &Path) -> Result<bool> {
        Ok(self.cache.get(path)?.is_in_managed_view)
    }

    pub fn is_directory(&mut self, path: &Path) -> Result<bool> {
        Ok(self.cache.get(path)?.is_directory)
    }

    /// Comment of the current checkout, or of the last checkin
    pub fn current_comment(&mut self, path: &Path) -> Result<String> {
        Ok(self.cache.get(path)?.comment.clone())
    }

    pub fn predecessor_path(&mut self, path: &Path) -> Result<String> {
        Ok(self.cache.get(path)?.predecessor_path.clone())
    }
}
