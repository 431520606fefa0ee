//! Per-key serialized toggles.
//!
//! [`toggle`](super::toggle) trusts the caller's in-memory sequence, so two
//! interleaved toggles on the same key can each write a result folded from
//! a stale read. [`SerializedLedger`] closes that gap: every mutation of a
//! key re-reads the stored value and writes it back while holding that
//! key's lock. Different keys never wait on each other.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use shelfmark_core::ledger::SerializedLedger;
//! use shelfmark_core::storage::MemoryStore;
//!
//! # async fn example() -> Result<(), shelfmark_core::ledger::LedgerError> {
//! let ledger = Arc::new(SerializedLedger::new(Arc::new(MemoryStore::new())));
//!
//! let a = Arc::clone(&ledger);
//! let b = Arc::clone(&ledger);
//! let (first, second) = tokio::join!(
//!     a.toggle("savedPapers", "p1"),
//!     b.toggle("savedPapers", "p2"),
//! );
//! assert!(first?.added && second?.added);
//! assert_eq!(ledger.load("savedPapers").await.len(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use super::{
    LedgerError, LoadPolicy, ToggleOutcome, dedup_ids, load_with_policy, toggle, try_load,
};
use crate::storage::KeyValueStore;

/// Ledger handle that serializes mutations per storage key.
///
/// Designed to be shared behind `Arc` across tasks.
pub struct SerializedLedger {
    store: Arc<dyn KeyValueStore>,
    policy: LoadPolicy,
    /// Arc'd so the `DashMap` shard guard is released before awaiting the lock.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl std::fmt::Debug for SerializedLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerializedLedger")
            .field("policy", &self.policy)
            .field("keys", &self.locks.len())
            .finish_non_exhaustive()
    }
}

impl SerializedLedger {
    /// Creates a handle that preserves stored duplicates on load.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_policy(store, LoadPolicy::Preserve)
    }

    /// Creates a handle with an explicit load policy.
    #[must_use]
    pub fn with_policy(store: Arc<dyn KeyValueStore>, policy: LoadPolicy) -> Self {
        Self {
            store,
            policy,
            locks: DashMap::new(),
        }
    }

    fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        Arc::clone(
            self.locks
                .entry(key.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        )
    }

    /// Fail-open load, same contract as [`load`](super::load).
    pub async fn load(&self, key: &str) -> Vec<String> {
        load_with_policy(self.store.as_ref(), key, self.policy).await
    }

    /// Toggles `id` against the freshly stored value of `key`.
    ///
    /// A corrupt stored value is treated as empty. Write failures are
    /// reported on the outcome exactly as [`toggle`](super::toggle) does.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Storage`] if the stored value cannot be read;
    /// nothing is written in that case, so an unreadable ledger is never
    /// overwritten with a one-element set.
    #[instrument(skip(self), fields(key = %key, id = %id))]
    pub async fn toggle(&self, key: &str, id: &str) -> Result<ToggleOutcome, LedgerError> {
        let lock = self.lock_for(key);
        let _guard = lock.lock().await;

        let current = match try_load(self.store.as_ref(), key).await {
            Ok(ids) => ids,
            Err(error @ LedgerError::Decode { .. }) => {
                warn!(key, error = %error, "Stored ledger is corrupt, toggling against empty set");
                Vec::new()
            }
            Err(error) => return Err(error),
        };
        let current = match self.policy {
            LoadPolicy::Preserve => current,
            LoadPolicy::Normalize => dedup_ids(current),
        };

        Ok(toggle(self.store.as_ref(), key, &current, id).await)
    }
}
