//! Shared utilities for critical tests (corrupted databases, seeded stores).

use std::path::PathBuf;

use shelfmark_core::{Database, KeyValueStore, SqliteStore};
use tempfile::TempDir;

/// Creates a SQLite database file that is intentionally corrupted (invalid content).
///
/// Returns the `TempDir` that must be kept alive and the path to the corrupted
/// file. Opening this path with `Database::new()` should yield
/// `DbError::Connection` or `DbError::Migration`.
pub fn corrupted_database() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("corrupted.db");

    // Garbage header so the file exists but is not a valid DB
    std::fs::write(&db_path, b"not a valid sqlite file\x00\x00\x00")
        .expect("Failed to write corrupted db file");

    (temp_dir, db_path)
}

/// Opens a fresh file-backed store.
pub async fn fresh_store() -> (TempDir, SqliteStore) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("ledger.db");
    let db = Database::new(&db_path).await.expect("create db");
    (temp_dir, SqliteStore::new(db))
}

/// Opens a fresh store with raw values written under each key.
pub async fn seeded_store(items: &[(&str, &str)]) -> (TempDir, SqliteStore) {
    let (temp_dir, store) = fresh_store().await;
    for (key, value) in items {
        store.set_item(key, value).await.expect("seed value");
    }
    (temp_dir, store)
}
