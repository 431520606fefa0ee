//! Error types for ledger operations.
//!
//! These never escape [`load`](super::load) or [`toggle`](super::toggle);
//! they are logged there and, for writes, attached to the
//! [`ToggleOutcome`](super::ToggleOutcome).

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised while reading, decoding, or persisting a ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The key-value store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored value is not a JSON array of strings.
    #[error(
        "stored value for '{key}' is not a JSON array of strings: {source}\n  Suggestion: Clear the ledger to reset it"
    )]
    Decode {
        /// Key whose value failed to decode.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the id sequence failed.
    #[error("failed to encode ledger '{key}': {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// A custom key was empty.
    #[error("ledger key must not be empty (got {0:?})")]
    InvalidKey(String),
}

impl LedgerError {
    /// Returns the storage error, when this is a storage failure.
    #[must_use]
    pub fn as_storage(&self) -> Option<&StorageError> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Decode { .. } | Self::Encode { .. } | Self::InvalidKey(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::StorageErrorKind;

    #[test]
    fn test_decode_error_names_key() {
        let source = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err = LedgerError::Decode {
            key: "savedPapers".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("savedPapers"));
        assert!(msg.contains("Suggestion"));
        assert!(err.as_storage().is_none());
    }

    #[test]
    fn test_storage_error_is_transparent() {
        let err = LedgerError::from(StorageError::Write {
            key: "savedBooks".to_string(),
            kind: StorageErrorKind::Io,
            message: "disk full".to_string(),
        });
        assert!(err.to_string().starts_with("failed to write 'savedBooks'"));
        assert_eq!(err.as_storage().unwrap().kind(), StorageErrorKind::Io);
    }
}
