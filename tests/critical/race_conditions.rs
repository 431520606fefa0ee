//! Phase 1 (P0): concurrent toggles on one key.
//! Unserialized toggles from stale snapshots lose updates; serialized toggles fold every one.

use std::sync::Arc;

use shelfmark_core::ledger;
use shelfmark_core::{KeyValueStore, SerializedLedger, is_member};

use crate::support::critical_utils::fresh_store;

#[tokio::test]
async fn p0_stale_snapshots_keep_only_last_write() {
    let (_temp, store) = fresh_store().await;

    // Two screens load the same empty ledger, then each toggles a different id
    let first_snapshot = ledger::load(&store, "savedPapers").await;
    let second_snapshot = ledger::load(&store, "savedPapers").await;
    ledger::toggle(&store, "savedPapers", &first_snapshot, "p1").await;
    ledger::toggle(&store, "savedPapers", &second_snapshot, "p2").await;

    let stored = ledger::load(&store, "savedPapers").await;
    assert_eq!(stored, vec!["p2".to_string()]);
}

#[tokio::test]
async fn p0_serialized_concurrent_toggles_fold_every_update() {
    let (_temp, store) = fresh_store().await;
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let serialized = Arc::new(SerializedLedger::new(Arc::clone(&store)));

    let num_tasks = 16_usize;
    let barrier = Arc::new(tokio::sync::Barrier::new(num_tasks));
    let mut handles = Vec::new();
    for t in 0..num_tasks {
        let serialized = Arc::clone(&serialized);
        let barrier = Arc::clone(&barrier);
        handles.push(tokio::spawn(async move {
            barrier.wait().await;
            serialized.toggle("savedBooks", &format!("b{t}")).await
        }));
    }
    for handle in handles {
        let outcome = handle.await.expect("task panicked").expect("read ok");
        assert!(outcome.is_persisted());
    }

    let stored = ledger::load(store.as_ref(), "savedBooks").await;
    assert_eq!(stored.len(), num_tasks);
    for t in 0..num_tasks {
        assert!(is_member(&stored, &format!("b{t}")));
    }
}

#[tokio::test]
async fn p0_serialized_toggles_on_different_keys_do_not_interfere() {
    let (_temp, store) = fresh_store().await;
    let store: Arc<dyn KeyValueStore> = Arc::new(store);
    let serialized = Arc::new(SerializedLedger::new(Arc::clone(&store)));

    let keys = ["savedPapers", "savedBooks", "downloadedNotes"];
    let mut handles = Vec::new();
    for key in keys {
        for i in 0..5 {
            let serialized = Arc::clone(&serialized);
            handles.push(tokio::spawn(async move {
                serialized.toggle(key, &format!("{key}-{i}")).await
            }));
        }
    }
    for handle in handles {
        handle.await.expect("task panicked").expect("read ok");
    }

    for key in keys {
        assert_eq!(serialized.load(key).await.len(), 5, "{key} lost updates");
    }
}
