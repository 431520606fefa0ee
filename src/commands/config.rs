//! Config command handlers: show effective configuration.

use shelfmark_core::LoadPolicy;

use crate::app_config::{LoadedConfig, Settings};

pub fn run_config_show_command(settings: &Settings, loaded: &LoadedConfig) {
    let resolved_path = loaded.path.as_ref().map_or_else(
        || "<unresolved>".to_string(),
        |path| path.display().to_string(),
    );
    println!("config_path = {resolved_path}");
    println!(
        "config_file = {}",
        if loaded.loaded_from_file {
            "loaded"
        } else {
            "not found (using defaults)"
        }
    );
    println!("db_path = {}", settings.db_path.display());
    println!("db_max_connections = {}", settings.database.max_connections);
    println!("db_busy_timeout_ms = {}", settings.database.busy_timeout_ms);
    println!(
        "dedup_on_load = {}",
        settings.ledger.load_policy == LoadPolicy::Normalize
    );
    println!("serialize_writes = {}", settings.ledger.serialize_writes);
    println!("verbosity = {}", settings.verbosity.as_str());
}
