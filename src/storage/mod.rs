//! Local key-value persistence used by the ledgers.
//!
//! The ledger never talks to a concrete backend. It depends on the
//! [`KeyValueStore`] capability (`get`, `set`, plus the maintenance calls
//! used by cache clearing) so the same code runs against:
//! - [`SqliteStore`] - durable on-disk storage backed by [`Database`](crate::Database)
//! - [`MemoryStore`] - in-memory map with fault injection, used by tests
//!
//! Values are opaque strings; encoding is the ledger's concern.

mod error;
mod memory;
mod sqlite;

pub use error::{StorageError, StorageErrorKind};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Asynchronous string key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored at `key`, or `None` if it was never written.
    async fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` at `key`, overwriting any prior value.
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing an absent key is not an error.
    async fn remove_item(&self, key: &str) -> Result<()>;

    /// Lists every stored key in ascending order.
    async fn keys(&self) -> Result<Vec<String>>;
}

#[async_trait]
impl<S> KeyValueStore for std::sync::Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        (**self).remove_item(key).await
    }

    async fn keys(&self) -> Result<Vec<String>> {
        (**self).keys().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;

    async fn round_trip(store: &dyn KeyValueStore) -> Option<String> {
        store.set_item("savedNotes", r#"["n1"]"#).await.unwrap();
        store.get_item("savedNotes").await.unwrap()
    }

    #[tokio::test]
    async fn test_store_usable_as_trait_object() {
        let store = MemoryStore::new();
        assert_eq!(round_trip(&store).await.as_deref(), Some(r#"["n1"]"#));
    }

    #[tokio::test]
    async fn test_arc_store_delegates_to_inner() {
        let inner = Arc::new(MemoryStore::new());
        let shared: Arc<dyn KeyValueStore> = inner.clone();

        shared.set_item("savedBooks", "[]").await.unwrap();

        assert_eq!(
            inner.get_item("savedBooks").await.unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(Arc::clone(&inner).keys().await.unwrap(), vec!["savedBooks"]);
    }
}
