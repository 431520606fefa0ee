//! Error types for key-value storage operations.

use std::fmt;

use thiserror::Error;

/// Structured classification for storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// `SQLite` returned busy/locked under concurrent access.
    BusyOrLocked,
    /// Constraint failure (empty key, not-null).
    ConstraintViolation,
    /// Connection pool timed out waiting for a free connection.
    PoolTimeout,
    /// Connection pool is closed.
    PoolClosed,
    /// Filesystem or transport IO failure.
    Io,
    /// Failure injected by a test double.
    Injected,
    /// Unclassified storage failure.
    Other,
}

impl StorageErrorKind {
    #[must_use]
    pub fn from_sqlx(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => Self::PoolTimeout,
            sqlx::Error::PoolClosed => Self::PoolClosed,
            sqlx::Error::Io(_) => Self::Io,
            sqlx::Error::Database(database_error) => {
                classify_database_error(database_error.as_ref())
            }
            _ => Self::Other,
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BusyOrLocked => "busy_or_locked",
            Self::ConstraintViolation => "constraint_violation",
            Self::PoolTimeout => "pool_timeout",
            Self::PoolClosed => "pool_closed",
            Self::Io => "io",
            Self::Injected => "injected",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}

fn classify_database_error(
    database_error: &(dyn sqlx::error::DatabaseError + 'static),
) -> StorageErrorKind {
    let code = database_error.code();
    if matches!(
        code.as_deref(),
        Some("SQLITE_BUSY" | "SQLITE_LOCKED" | "5" | "6")
    ) {
        return StorageErrorKind::BusyOrLocked;
    }

    if database_error.is_check_violation()
        || database_error.is_unique_violation()
        || code
            .as_deref()
            .is_some_and(|value| value.starts_with("SQLITE_CONSTRAINT") || value == "275")
    {
        return StorageErrorKind::ConstraintViolation;
    }

    let message = database_error.message().to_ascii_lowercase();
    if message.contains("database is locked") || message.contains("database is busy") {
        return StorageErrorKind::BusyOrLocked;
    }
    if message.contains("constraint failed") {
        return StorageErrorKind::ConstraintViolation;
    }

    StorageErrorKind::Other
}

/// Errors returned by a [`KeyValueStore`](super::KeyValueStore).
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// Reading a key failed.
    #[error("failed to read '{key}' ({kind}): {message}")]
    Read {
        /// Key being read.
        key: String,
        /// Typed classification.
        kind: StorageErrorKind,
        /// Backend error text.
        message: String,
    },

    /// Writing a key failed.
    #[error(
        "failed to write '{key}' ({kind}): {message}\n  Suggestion: Check free disk space and that the database file is writable"
    )]
    Write {
        /// Key being written.
        key: String,
        /// Typed classification.
        kind: StorageErrorKind,
        /// Backend error text.
        message: String,
    },

    /// Listing or removing keys failed.
    #[error("storage maintenance failed ({kind}): {message}")]
    Maintenance {
        /// Typed classification.
        kind: StorageErrorKind,
        /// Backend error text.
        message: String,
    },
}

impl StorageError {
    /// Builds a read error from a sqlx failure.
    #[must_use]
    pub fn read(key: &str, err: &sqlx::Error) -> Self {
        Self::Read {
            key: key.to_string(),
            kind: StorageErrorKind::from_sqlx(err),
            message: err.to_string(),
        }
    }

    /// Builds a write error from a sqlx failure.
    #[must_use]
    pub fn write(key: &str, err: &sqlx::Error) -> Self {
        Self::Write {
            key: key.to_string(),
            kind: StorageErrorKind::from_sqlx(err),
            message: err.to_string(),
        }
    }

    /// Builds a maintenance error from a sqlx failure.
    #[must_use]
    pub fn maintenance(err: &sqlx::Error) -> Self {
        Self::Maintenance {
            kind: StorageErrorKind::from_sqlx(err),
            message: err.to_string(),
        }
    }

    /// Returns the typed classification.
    #[must_use]
    pub fn kind(&self) -> StorageErrorKind {
        match self {
            Self::Read { kind, .. } | Self::Write { kind, .. } | Self::Maintenance { kind, .. } => {
                *kind
            }
        }
    }

    /// Returns true when this error is a database busy/locked condition.
    #[must_use]
    pub fn is_busy_or_locked(&self) -> bool {
        self.kind() == StorageErrorKind::BusyOrLocked
    }
}
