//! Shelfmark Core Library
//!
//! Device-local bookkeeping of which remote entities (papers, books, notes)
//! a user has saved or downloaded. Each ledger is a set of opaque remote
//! ids persisted as a JSON array under one key of a local key-value store.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`db`] - `SQLite` connection and schema management
//! - [`storage`] - The injected key-value store capability and its backends
//! - [`ledger`] - Load, toggle and membership over saved/downloaded ledgers

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod db;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use db::{Database, DatabaseOptions, DbError};
pub use ledger::{
    ContentKind, EntityStatus, LedgerError, LedgerKey, LedgerKind, LedgerOptions, LedgerView,
    LoadPolicy, SerializedLedger, Shelf, ToggleOutcome, is_member, load, toggle,
};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError, StorageErrorKind};
