//! Time-to-live cache of element records.
//!
//! [`MetadataCache`] is the single owner of every [`ElementRecord`]. A record is served
//! while it is younger than the TTL and refetched otherwise. There is no size-based
//! eviction; the working set is the handful of files open in an editor.
//!
//! The cache is not synchronised. It lives on the thread that dispatches commands, and
//! detached processes never write back into it.

use crate::core::{
    describe::ElementFetcher,
    element::ElementRecord,
    error::Result,
};
use chrono::Utc;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a fetched record stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);

pub struct MetadataCache {
    fetcher: Box<dyn ElementFetcher>,
    entries: HashMap<PathBuf, ElementRecord>,
    ttl: Duration,
}

impl MetadataCache {
    pub fn new(fetcher: Box<dyn ElementFetcher>) -> Self {
        Self::with_ttl(fetcher, DEFAULT_TTL)
    }

    pub fn with_ttl(fetcher: Box<dyn ElementFetcher>, ttl: Duration) -> Self {
        Self {
            fetcher,
            entries: HashMap::new(),
            ttl,
        }
    }

    /// Return the record for `path`, fetching it if missing or older than the TTL.
    ///
    /// A failed fetch leaves no entry behind for `path`.
    pub fn get(&mut self, path: &Path) -> Result<&ElementRecord> {
        let ttl = self.ttl;
        match self.entries.entry(path.to_path_buf()) {
            Entry::Occupied(entry) if is_fresh(entry.get(), ttl) => {
                log::debug!("Cache hit for {}", path.display());
                Ok(&*entry.into_mut())
            }
            Entry::Occupied(mut entry) => {
                log::debug!("Cache entry expired for {}", path.display());
                match self.fetcher.fetch(path) {
                    Ok(record) => {
                        entry.insert(record);
                        Ok(&*entry.into_mut())
                    }
                    Err(e) => {
                        entry.remove();
                        Err(e)
                    }
                }
            }
            Entry::Vacant(entry) => {
                log::debug!("Cache miss for {}", path.display());
                let record = self.fetcher.fetch(path)?;
                Ok(&*entry.insert(record))
            }
        }
    }

    /// Drop every entry
    pub fn flush(&mut self) {
        log::debug!("Flushing {} cached element(s)", self.entries.len());
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

fn is_fresh(record: &ElementRecord, ttl: Duration) -> bool {
    match Utc::now().signed_duration_since(record.fetched_at).to_std() {
        Ok(age) => age < ttl,
        // Clock moved backwards; refetch rather than trust the record
        Err(_) => false,
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::error::ClearNavigatorError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Fetcher serving records from a table and counting calls
    #[derive(Clone, Default)]
    pub struct TableFetcher {
        pub records: Rc<RefCell<HashMap<PathBuf, ElementRecord>>>,
        pub calls: Rc<Cell<usize>>,
    }

    impl TableFetcher {
        pub fn with_records(records: impl IntoIterator<Item = ElementRecord>) -> Self {
            let fetcher = Self::default();
            for record in records {
                fetcher.set(record);
            }
            fetcher
        }

        pub fn set(&self, record: ElementRecord) {
            self.records.borrow_mut().insert(record.path.clone(), record);
        }
    }

    impl ElementFetcher for TableFetcher {
        fn fetch(&self, path: &Path) -> Result<ElementRecord> {
            self.calls.set(self.calls.get() + 1);
            let mut record = self
                .records
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| ClearNavigatorError::describe_failed(path, "not in table"))?;
            record.fetched_at = Utc::now();
            Ok(record)
        }
    }
}
