// In-memory configuration table for tests, with the same unique-by-name
// behaviour as the SQLite store.

use super::configuration_models::ConfigurationEntry;
use super::configuration_store::{ConfigurationStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

/// `failures` makes the first N inserts fail as if the database were down.
pub struct InMemoryConfigurationStore {
    rows: Mutex<BTreeMap<String, Option<String>>>,
    failures: AtomicU32,
    calls: AtomicU32,
}

impl InMemoryConfigurationStore {
    pub fn new() -> Self {
        Self::failing(0)
    }

    pub fn failing(failures: u32) -> Self {
        Self {
            rows: Mutex::new(BTreeMap::new()),
            failures: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }

    /// How many times `insert_missing` was called.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfigurationStore for InMemoryConfigurationStore {
    async fn insert_missing(&self, names: &[&str]) -> Result<u64, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failures.load(Ordering::SeqCst) > 0 {
            self.failures.fetch_sub(1, Ordering::SeqCst);
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }

        let mut rows = self.rows.lock().unwrap();
        let mut inserted = 0;
        for name in names {
            if !rows.contains_key(*name) {
                rows.insert(name.to_string(), None);
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn list(&self) -> Result<Vec<ConfigurationEntry>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .map(|(name, value)| ConfigurationEntry {
                name: name.clone(),
                value: value.clone(),
            })
            .collect())
    }
}
