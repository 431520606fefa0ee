//! Saved and downloaded ledgers.
//!
//! A ledger is a device-local set of remote entity ids stored under one
//! key of a [`KeyValueStore`]. The value is kept as an insertion-ordered
//! sequence but treated as a set: [`toggle`] appends an absent id and
//! removes every occurrence of a present one.
//!
//! # Overview
//!
//! - [`load`] / [`toggle`] / [`is_member`] - stateless operations over an explicit key
//! - [`LedgerView`] - one screen's in-memory mirror of a single ledger
//! - [`Shelf`] - saved and downloaded status of one content category
//! - [`SerializedLedger`] - toggles that read and write under a per-key lock
//!
//! Failures never propagate out of `load` or `toggle`: a failed read is
//! logged and yields an empty set, a failed write is logged and reported on
//! the [`ToggleOutcome`] while the returned sequence still reflects the toggle.
//!
//! # Example
//!
//! ```
//! use shelfmark_core::ledger::{self, ContentKind, LedgerKey};
//! use shelfmark_core::storage::MemoryStore;
//!
//! # async fn example() {
//! let store = MemoryStore::new();
//! let key = LedgerKey::saved(ContentKind::Papers);
//!
//! let current = ledger::load(&store, key.as_str()).await;
//! let outcome = ledger::toggle(&store, key.as_str(), &current, "p1").await;
//! assert!(outcome.added);
//! assert!(ledger::is_member(&outcome.ids, "p1"));
//! # }
//! ```

mod codec;
mod error;
mod key;
mod serialized;
mod shelf;
mod view;

pub use codec::{decode_ids, encode_ids};
pub use error::LedgerError;
pub use key::{ContentKind, LedgerKey, LedgerKind};
pub use serialized::SerializedLedger;
pub use shelf::{EntityStatus, Shelf};
pub use view::LedgerView;

use tracing::{debug, instrument, warn};

use crate::storage::KeyValueStore;

/// Generic notice shown when a toggle could not be persisted.
pub const FAILURE_NOTICE: &str = "Failed to save. Please try again.";

/// How [`load_with_policy`] treats duplicate ids already in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Return the stored sequence unchanged.
    #[default]
    Preserve,
    /// Drop repeated ids, keeping the first occurrence.
    Normalize,
}

/// Ledger behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerOptions {
    /// Duplicate handling on load.
    pub load_policy: LoadPolicy,
    /// Route toggles through [`SerializedLedger`].
    pub serialize_writes: bool,
}

/// Result of a [`toggle`].
#[derive(Debug)]
pub struct ToggleOutcome {
    /// Storage key that was toggled.
    pub key: String,
    /// Target entity id.
    pub id: String,
    /// The sequence after the toggle, whether or not it was persisted.
    pub ids: Vec<String>,
    /// True iff `id` was absent before and is now present.
    pub added: bool,
    /// Set when writing `ids` back to storage failed.
    pub persist_error: Option<LedgerError>,
}

impl ToggleOutcome {
    /// True when the new sequence reached storage.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.persist_error.is_none()
    }

    /// User-facing confirmation naming the action and `label`.
    ///
    /// Falls back to [`FAILURE_NOTICE`] when the write failed.
    #[must_use]
    pub fn notice(&self, label: &str) -> String {
        if !self.is_persisted() {
            return FAILURE_NOTICE.to_string();
        }
        let kind = LedgerKey::custom(self.key.as_str())
            .ok()
            .and_then(|key| key.kind())
            .unwrap_or(LedgerKind::Saved);
        match (kind, self.added) {
            (LedgerKind::Saved, true) => format!("Saved {label}"),
            (LedgerKind::Saved, false) => format!("Removed {label}"),
            (LedgerKind::Downloaded, true) => format!("Marked {label} as downloaded"),
            (LedgerKind::Downloaded, false) => format!("Removed {label} from downloads"),
        }
    }
}

/// Returns true if `id` occurs anywhere in `ids`.
#[must_use]
pub fn is_member(ids: &[String], id: &str) -> bool {
    ids.iter().any(|existing| existing == id)
}

/// Applies a toggle without touching storage.
///
/// Present ids are removed everywhere they occur; absent ids are appended.
/// Returns the new sequence and whether `id` was added.
#[must_use]
pub fn toggle_ids(current: &[String], id: &str) -> (Vec<String>, bool) {
    if is_member(current, id) {
        let remaining = current
            .iter()
            .filter(|existing| existing.as_str() != id)
            .cloned()
            .collect();
        (remaining, false)
    } else {
        let mut extended = Vec::with_capacity(current.len() + 1);
        extended.extend_from_slice(current);
        extended.push(id.to_string());
        (extended, true)
    }
}

/// Removes repeated ids, keeping the first occurrence of each.
#[must_use]
pub fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Reads and decodes a ledger, surfacing every failure.
///
/// An absent key is `Ok(vec![])`.
///
/// # Errors
///
/// Returns [`LedgerError::Storage`] when the read fails and
/// [`LedgerError::Decode`] when the stored value is not a JSON array of strings.
pub async fn try_load(store: &dyn KeyValueStore, key: &str) -> Result<Vec<String>, LedgerError> {
    match store.get_item(key).await? {
        None => Ok(Vec::new()),
        Some(raw) => decode_ids(key, &raw),
    }
}

/// Loads a ledger, returning the stored sequence unchanged.
///
/// Never fails: read and decode errors are logged and yield an empty sequence.
pub async fn load(store: &dyn KeyValueStore, key: &str) -> Vec<String> {
    load_with_policy(store, key, LoadPolicy::Preserve).await
}

/// Loads a ledger, applying `policy` to duplicates.
///
/// Never fails: read and decode errors are logged and yield an empty sequence.
#[instrument(skip(store), fields(key = %key))]
pub async fn load_with_policy(
    store: &dyn KeyValueStore,
    key: &str,
    policy: LoadPolicy,
) -> Vec<String> {
    let ids = match try_load(store, key).await {
        Ok(ids) => ids,
        Err(error) => {
            warn!(key, error = %error, "Failed to load ledger, treating as empty");
            return Vec::new();
        }
    };
    let ids = match policy {
        LoadPolicy::Preserve => ids,
        LoadPolicy::Normalize => dedup_ids(ids),
    };
    debug!(key, count = ids.len(), "Ledger loaded");
    ids
}

/// Encodes and writes `ids` at `key`.
///
/// # Errors
///
/// Returns [`LedgerError::Encode`] or [`LedgerError::Storage`].
pub async fn persist(
    store: &dyn KeyValueStore,
    key: &str,
    ids: &[String],
) -> Result<(), LedgerError> {
    let raw = encode_ids(key, ids)?;
    store.set_item(key, &raw).await?;
    Ok(())
}

/// Toggles `id` in `current` and writes the result to `key`.
///
/// The write happens immediately. If it fails the error is logged and
/// attached to the outcome; `ids` still reflects the toggle and nothing is
/// rolled back or retried.
#[instrument(skip(store, current), fields(key = %key, id = %id, len = current.len()))]
pub async fn toggle(
    store: &dyn KeyValueStore,
    key: &str,
    current: &[String],
    id: &str,
) -> ToggleOutcome {
    let (ids, added) = toggle_ids(current, id);
    let persist_error = match persist(store, key, &ids).await {
        Ok(()) => {
            debug!(key, id, added, count = ids.len(), "Ledger toggled");
            None
        }
        Err(error) => {
            warn!(key, id, added, error = %error, "Failed to persist ledger toggle");
            Some(error)
        }
    };
    ToggleOutcome {
        key: key.to_string(),
        id: id.to_string(),
        ids,
        added,
        persist_error,
    }
}
