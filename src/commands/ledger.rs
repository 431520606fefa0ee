//! Ledger command handlers: list, toggle, status, clear, keys.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use shelfmark_core::ledger::{self, FAILURE_NOTICE};
use shelfmark_core::{
    ContentKind, EntityStatus, KeyValueStore, LedgerKey, LedgerKind, SerializedLedger, Shelf,
    ToggleOutcome,
};
use tracing::warn;

use crate::ProcessExit;
use crate::app_config::Settings;

#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    key: &'a str,
    ids: &'a [String],
}

#[derive(Debug, Serialize)]
struct ToggleOutput<'a> {
    key: &'a str,
    id: &'a str,
    added: bool,
    persisted: bool,
    ids: &'a [String],
    notice: &'a str,
}

#[derive(Debug, Serialize)]
struct StatusOutput<'a> {
    content: ContentKind,
    id: &'a str,
    #[serde(flatten)]
    status: EntityStatus,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string(value).context("Failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}

pub async fn run_list_command(
    store: Arc<dyn KeyValueStore>,
    settings: &Settings,
    kind: LedgerKind,
    content: ContentKind,
    json: bool,
) -> Result<()> {
    let key = LedgerKey::new(kind, content);
    let ids = ledger::load_with_policy(store.as_ref(), key.as_str(), settings.ledger.load_policy)
        .await;

    if json {
        return print_json(&ListOutput {
            key: key.as_str(),
            ids: &ids,
        });
    }
    if ids.is_empty() {
        println!("No {kind} {content}.");
    }
    for id in &ids {
        println!("{id}");
    }
    Ok(())
}

pub async fn run_toggle_command(
    store: Arc<dyn KeyValueStore>,
    settings: &Settings,
    kind: LedgerKind,
    content: ContentKind,
    id: &str,
    json: bool,
) -> Result<ProcessExit> {
    let key = LedgerKey::new(kind, content);

    let outcome = if settings.ledger.serialize_writes {
        let serialized = SerializedLedger::with_policy(store, settings.ledger.load_policy);
        match serialized.toggle(key.as_str(), id).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(key = %key, id, error = %error, "Toggle aborted, ledger unreadable");
                eprintln!("{FAILURE_NOTICE}");
                return Ok(ProcessExit::Failure);
            }
        }
    } else {
        let current =
            ledger::load_with_policy(store.as_ref(), key.as_str(), settings.ledger.load_policy)
                .await;
        ledger::toggle(store.as_ref(), key.as_str(), &current, id).await
    };

    report_toggle(&outcome, content, json)?;
    Ok(if outcome.is_persisted() {
        ProcessExit::Success
    } else {
        ProcessExit::Failure
    })
}

fn report_toggle(outcome: &ToggleOutcome, content: ContentKind, json: bool) -> Result<()> {
    let notice = outcome.notice(&format!("{} {}", content.singular(), outcome.id));
    if json {
        return print_json(&ToggleOutput {
            key: &outcome.key,
            id: &outcome.id,
            added: outcome.added,
            persisted: outcome.is_persisted(),
            ids: &outcome.ids,
            notice: &notice,
        });
    }
    if outcome.is_persisted() {
        println!("{notice}");
    } else {
        eprintln!("{notice}");
    }
    Ok(())
}

pub async fn run_status_command(
    store: Arc<dyn KeyValueStore>,
    settings: &Settings,
    content: ContentKind,
    id: &str,
    json: bool,
) -> Result<()> {
    let shelf = Shelf::open(store, content, settings.ledger.load_policy).await;
    let status = shelf.status(id);

    if json {
        return print_json(&StatusOutput {
            content,
            id,
            status,
        });
    }
    println!("saved = {}", status.saved);
    println!("downloaded = {}", status.downloaded);
    Ok(())
}

pub async fn run_clear_command(
    store: &dyn KeyValueStore,
    kind: LedgerKind,
    content: ContentKind,
) -> Result<()> {
    let key = LedgerKey::new(kind, content);
    store
        .remove_item(key.as_str())
        .await
        .with_context(|| format!("Failed to clear '{key}'"))?;
    println!("Cleared {key}");
    Ok(())
}

pub async fn run_keys_command(store: &dyn KeyValueStore, json: bool) -> Result<()> {
    let keys = store.keys().await.context("Failed to list stored keys")?;
    if json {
        return print_json(&keys);
    }
    for key in &keys {
        println!("{key}");
    }
    Ok(())
}
