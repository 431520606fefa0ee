//! Phase 1 (P0): ledger state across restarts.
//! Re-open the DB after a normal close and after an unpersisted toggle.

use std::sync::Arc;

use shelfmark_core::ledger::LoadPolicy;
use shelfmark_core::{ContentKind, Database, KeyValueStore, LedgerKey, LedgerView, SqliteStore};
use tempfile::TempDir;

#[tokio::test]
async fn p0_ledger_persists_after_reopen() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("persist.db");
    let key = LedgerKey::saved(ContentKind::Papers);

    {
        let db = Database::new(&db_path).await.expect("create db");
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db.clone()));
        let mut view = LedgerView::open(store, key.clone(), LoadPolicy::Preserve).await;
        view.toggle("p1").await;
        view.toggle("p2").await;
        db.close().await;
    }

    let db = Database::new(&db_path).await.expect("reopen db");
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db));
    let view = LedgerView::open(store, key, LoadPolicy::Preserve).await;
    assert_eq!(view.ids(), ["p1".to_string(), "p2".to_string()]);
}

#[tokio::test]
async fn p0_unpersisted_toggle_is_discarded_on_restart() {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("restart.db");
    let key = LedgerKey::downloaded(ContentKind::Books);

    let db = Database::new(&db_path).await.expect("create db");
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db.clone()));
    let mut view = LedgerView::open(store, key.clone(), LoadPolicy::Preserve).await;
    view.toggle("b1").await;

    // Storage disappears underneath the screen
    db.close().await;
    let outcome = view.toggle("b2").await;
    assert!(!outcome.is_persisted());
    assert!(view.contains("b2"), "in-memory state is not rolled back");

    let db = Database::new(&db_path).await.expect("reopen db");
    let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::new(db));
    let reopened = LedgerView::open(store, key, LoadPolicy::Preserve).await;
    assert!(reopened.contains("b1"));
    assert!(!reopened.contains("b2"));
}
