//! CLI command handlers.
//!
//! Every handler receives the effective [`Settings`]; those that touch
//! ledgers open the store through [`open_store`].

mod config;
mod ledger;

use std::fs;
use std::sync::Arc;

use anyhow::{Context, Result};
use shelfmark_core::{Database, KeyValueStore, SqliteStore};
use tracing::debug;

use crate::ProcessExit;
use crate::app_config::{LoadedConfig, Settings};
use crate::cli::{Cli, Command, ConfigCommand};

pub use config::run_config_show_command;
pub use ledger::{
    run_clear_command, run_keys_command, run_list_command, run_status_command,
    run_toggle_command,
};

/// Opens the `SQLite` store at the configured path, creating parent directories.
pub async fn open_store(settings: &Settings) -> Result<Arc<dyn KeyValueStore>> {
    if let Some(parent) = settings.db_path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    let db = Database::new_with_options(&settings.db_path, settings.database)
        .await
        .with_context(|| format!("Failed to open database '{}'", settings.db_path.display()))?;
    debug!(path = %settings.db_path.display(), "Ledger database opened");
    Ok(Arc::new(SqliteStore::new(db)))
}

/// Runs the parsed command and returns the process exit outcome.
pub async fn dispatch(cli: &Cli, settings: &Settings, loaded: &LoadedConfig) -> Result<ProcessExit> {
    match &cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Show => {
                run_config_show_command(settings, loaded);
                Ok(ProcessExit::Success)
            }
        },
        Command::List { kind, content } => {
            let store = open_store(settings).await?;
            run_list_command(store, settings, *kind, *content, cli.json).await?;
            Ok(ProcessExit::Success)
        }
        Command::Toggle { kind, content, id } => {
            let store = open_store(settings).await?;
            run_toggle_command(store, settings, *kind, *content, id, cli.json).await
        }
        Command::Status { content, id } => {
            let store = open_store(settings).await?;
            run_status_command(store, settings, *content, id, cli.json).await?;
            Ok(ProcessExit::Success)
        }
        Command::Clear { kind, content } => {
            let store = open_store(settings).await?;
            run_clear_command(store.as_ref(), *kind, *content).await?;
            Ok(ProcessExit::Success)
        }
        Command::Keys => {
            let store = open_store(settings).await?;
            run_keys_command(store.as_ref(), cli.json).await?;
            Ok(ProcessExit::Success)
        }
    }
}
