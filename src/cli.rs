//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shelfmark_core::{ContentKind, LedgerKind};

/// Inspect and edit device-local saved and downloaded ledgers.
///
/// Each ledger is a set of remote entity ids stored under a key such as
/// `savedPapers` or `downloadedNotes`.
#[derive(Parser, Debug)]
#[command(name = "shelfmark")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Database file holding the ledgers (overrides config `db_path`)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Drop duplicate ids when loading ledgers
    #[arg(long, global = true)]
    pub dedup: bool,

    /// Re-read each ledger under a per-key lock before writing
    #[arg(long, global = true)]
    pub serialize_writes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the ids in a ledger
    List {
        /// saved or downloaded
        kind: LedgerKind,
        /// papers, books, or notes
        content: ContentKind,
    },
    /// Add an id to a ledger, or remove it if present
    Toggle {
        /// saved or downloaded
        kind: LedgerKind,
        /// papers, books, or notes
        content: ContentKind,
        /// Remote entity id
        id: String,
    },
    /// Show whether an entity is saved and/or downloaded
    Status {
        /// papers, books, or notes
        content: ContentKind,
        /// Remote entity id
        id: String,
    },
    /// Delete a ledger from storage
    Clear {
        /// saved or downloaded
        kind: LedgerKind,
        /// papers, books, or notes
        content: ContentKind,
    },
    /// List every stored key
    Keys,
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
}
