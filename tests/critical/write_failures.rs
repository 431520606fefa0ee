//! Phase 1 (P0): storage write failures.
//! A failed write is reported on the outcome, never raised, and never rolled back.

use std::sync::Arc;

use shelfmark_core::ledger::{self, FAILURE_NOTICE, LoadPolicy};
use shelfmark_core::{ContentKind, KeyValueStore, MemoryStore, Shelf, StorageErrorKind};

use crate::support::critical_utils::seeded_store;

#[tokio::test]
async fn p0_closed_pool_write_failure_is_reported_not_raised() {
    let (_temp, store) = seeded_store(&[("savedPapers", r#"["p1"]"#)]).await;
    let current = ledger::load(&store, "savedPapers").await;
    store.database().close().await;

    let outcome = ledger::toggle(&store, "savedPapers", &current, "p2").await;

    assert_eq!(outcome.ids, vec!["p1".to_string(), "p2".to_string()]);
    assert!(outcome.added);
    let error = outcome.persist_error.as_ref().expect("write should fail");
    assert_eq!(
        error.as_storage().map(|err| err.kind()),
        Some(StorageErrorKind::PoolClosed)
    );
    assert_eq!(outcome.notice("paper p2"), FAILURE_NOTICE);
}

#[tokio::test]
async fn p0_closed_pool_read_failure_loads_empty() {
    let (_temp, store) = seeded_store(&[("savedNotes", r#"["n1"]"#)]).await;
    store.database().close().await;

    assert!(ledger::load(&store, "savedNotes").await.is_empty());
}

#[tokio::test]
async fn p0_failed_write_heals_on_next_successful_toggle() {
    let store = Arc::new(MemoryStore::new());
    let mut shelf = Shelf::open(store.clone(), ContentKind::Notes, LoadPolicy::Preserve).await;

    store.set_fail_writes(true);
    let failed = shelf.toggle_saved("n1").await;
    assert!(!failed.is_persisted());
    assert_eq!(store.raw("savedNotes"), None);

    store.set_fail_writes(false);
    let healed = shelf.toggle_saved("n2").await;
    assert!(healed.is_persisted());
    assert_eq!(store.raw("savedNotes").as_deref(), Some(r#"["n1","n2"]"#));
}

#[tokio::test]
async fn p0_bookmark_failure_does_not_block_other_ledger() {
    let (_temp, store) = seeded_store(&[]).await;
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let mut shelf = Shelf::open(Arc::clone(&store), ContentKind::Papers, LoadPolicy::Preserve).await;

    // Empty keys are rejected by storage; the download ledger is unaffected
    let broken = ledger::toggle(store.as_ref(), "", &[], "p1").await;
    assert!(!broken.is_persisted());

    let downloaded = shelf.toggle_downloaded("p1").await;
    assert!(downloaded.is_persisted());
    assert!(shelf.status("p1").downloaded);
}

