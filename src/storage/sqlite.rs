//! `SQLite`-backed [`KeyValueStore`].

use async_trait::async_trait;
use sqlx::Row;
use tracing::instrument;

use super::{KeyValueStore, Result, StorageError};
use crate::db::Database;

/// Durable key-value store, one `kv_store` row per key.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
}

impl SqliteStore {
    /// Creates a store over an open database.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Returns the underlying database handle.
    #[must_use]
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    #[instrument(skip(self), fields(key = %key))]
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|err| StorageError::read(key, &err))?;

        row.map(|row| row.try_get::<String, _>("value"))
            .transpose()
            .map_err(|err| StorageError::read(key, &err))
    }

    #[instrument(skip(self, value), fields(key = %key, bytes = value.len()))]
    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r"INSERT INTO kv_store (key, value, updated_at)
              VALUES (?, ?, datetime('now'))
              ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .execute(self.db.pool())
        .await
        .map_err(|err| StorageError::write(key, &err))?;

        Ok(())
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn remove_item(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(self.db.pool())
            .await
            .map_err(|err| StorageError::write(key, &err))?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn keys(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT key FROM kv_store ORDER BY key ASC")
            .fetch_all(self.db.pool())
            .await
            .map_err(|err| StorageError::maintenance(&err))
    }
}
