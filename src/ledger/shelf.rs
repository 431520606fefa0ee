//! Saved and downloaded status for one content category.

use std::sync::Arc;

use serde::Serialize;

use super::{ContentKind, LedgerKey, LedgerView, LoadPolicy, ToggleOutcome};
use crate::storage::KeyValueStore;

/// Membership of one entity in both ledgers of its category.
///
/// The two flags are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EntityStatus {
    pub saved: bool,
    pub downloaded: bool,
}

/// The saved and downloaded ledgers of a content category, loaded together.
#[derive(Debug, Clone)]
pub struct Shelf {
    content: ContentKind,
    saved: LedgerView,
    downloaded: LedgerView,
}

impl Shelf {
    /// Loads both ledgers for `content`.
    pub async fn open(
        store: Arc<dyn KeyValueStore>,
        content: ContentKind,
        policy: LoadPolicy,
    ) -> Self {
        let saved = LedgerView::open(Arc::clone(&store), LedgerKey::saved(content), policy).await;
        let downloaded = LedgerView::open(store, LedgerKey::downloaded(content), policy).await;
        Self {
            content,
            saved,
            downloaded,
        }
    }

    #[must_use]
    pub fn content(&self) -> ContentKind {
        self.content
    }

    #[must_use]
    pub fn status(&self, id: &str) -> EntityStatus {
        EntityStatus {
            saved: self.saved.contains(id),
            downloaded: self.downloaded.contains(id),
        }
    }

    pub async fn toggle_saved(&mut self, id: &str) -> ToggleOutcome {
        self.saved.toggle(id).await
    }

    pub async fn toggle_downloaded(&mut self, id: &str) -> ToggleOutcome {
        self.downloaded.toggle(id).await
    }

    #[must_use]
    pub fn saved(&self) -> &LedgerView {
        &self.saved
    }

    #[must_use]
    pub fn downloaded(&self) -> &LedgerView {
        &self.downloaded
    }
}
