//! In-memory [`KeyValueStore`] with fault injection.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::trace;

use super::{KeyValueStore, Result, StorageError, StorageErrorKind};

/// Map-backed store that lives for the lifetime of the value.
///
/// Reads and writes can be made to fail on demand, which is how the
/// fail-open load path and the no-rollback toggle path are exercised
/// without touching real device storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: DashMap<String, String>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with raw values.
    #[must_use]
    pub fn with_items<I, K, V>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let store = Self::new();
        for (key, value) in items {
            store.items.insert(key.into(), value.into());
        }
        store
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write and removal fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the raw stored value without going through fault injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.get(key).map(|entry| entry.value().clone())
    }

    /// Number of successful `set_item` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn injected_write(&self, key: &str) -> Option<StorageError> {
        self.fail_writes
            .load(Ordering::SeqCst)
            .then(|| StorageError::Write {
                key: key.to_string(),
                kind: StorageErrorKind::Injected,
                message: "injected write failure".to_string(),
            })
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Read {
                key: key.to_string(),
                kind: StorageErrorKind::Injected,
                message: "injected read failure".to_string(),
            });
        }
        Ok(self.raw(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Some(err) = self.injected_write(key) {
            return Err(err);
        }
        trace!(key, bytes = value.len(), "memory store write");
        self.items.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        if let Some(err) = self.injected_write(key) {
            return Err(err);
        }
        self.items.remove(key);
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.items.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}
