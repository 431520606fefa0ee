//! One screen's in-memory mirror of a ledger.

use std::sync::Arc;

use super::{LedgerKey, LoadPolicy, ToggleOutcome, is_member, load_with_policy, toggle};
use crate::storage::KeyValueStore;

/// A ledger loaded into memory for rendering.
///
/// The mirror is filled from storage on [`open`](Self::open) and replaced
/// by every [`toggle`](Self::toggle), including toggles whose write failed.
/// Two views over the same key do not observe each other until
/// [`reload`](Self::reload).
#[derive(Clone)]
pub struct LedgerView {
    store: Arc<dyn KeyValueStore>,
    key: LedgerKey,
    policy: LoadPolicy,
    ids: Vec<String>,
}

impl std::fmt::Debug for LedgerView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerView")
            .field("key", &self.key)
            .field("policy", &self.policy)
            .field("ids", &self.ids)
            .finish_non_exhaustive()
    }
}

impl LedgerView {
    /// Loads `key` from `store` into a new view.
    pub async fn open(store: Arc<dyn KeyValueStore>, key: LedgerKey, policy: LoadPolicy) -> Self {
        let ids = load_with_policy(store.as_ref(), key.as_str(), policy).await;
        Self {
            store,
            key,
            policy,
            ids,
        }
    }

    /// Replaces the mirror with the current stored value.
    pub async fn reload(&mut self) {
        self.ids = load_with_policy(self.store.as_ref(), self.key.as_str(), self.policy).await;
    }

    /// Toggles `id`, persists, and updates the mirror.
    pub async fn toggle(&mut self, id: &str) -> ToggleOutcome {
        let outcome = toggle(self.store.as_ref(), self.key.as_str(), &self.ids, id).await;
        self.ids.clone_from(&outcome.ids);
        outcome
    }

    /// Membership test against the mirror.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        is_member(&self.ids, id)
    }

    #[must_use]
    pub fn key(&self) -> &LedgerKey {
        &self.key
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
