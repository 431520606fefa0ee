//! Application configuration loading for CLI defaults.
//!
//! The file is a flat `key = value` subset of TOML:
//!
//! ```toml
//! db_path = "/home/me/.local/share/shelfmark/shelfmark.db"
//! db_max_connections = 5
//! db_busy_timeout_ms = 5000
//! dedup_on_load = false
//! serialize_writes = true
//! verbosity = "default"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use shelfmark_core::db::{DEFAULT_BUSY_TIMEOUT_MS, DEFAULT_MAX_CONNECTIONS};
use shelfmark_core::{DatabaseOptions, LedgerOptions, LoadPolicy};

use crate::cli::Cli;

const APP_DIR: &str = "shelfmark";
const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "shelfmark.db";

/// TOML-backed file configuration for shelfmark defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Database file holding every ledger.
    pub db_path: Option<PathBuf>,
    /// Database pool max connections (1..=20).
    pub db_max_connections: Option<u32>,
    /// Database busy timeout in milliseconds.
    pub db_busy_timeout_ms: Option<u32>,
    /// Drop duplicate ids when loading a ledger.
    pub dedup_on_load: Option<bool>,
    /// Serialize toggles per key (re-read under lock before writing).
    pub serialize_writes: Option<bool>,
    /// Default verbosity mode.
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        if let Some(value) = self.db_max_connections
            && !(1..=20).contains(&value)
        {
            bail!("Invalid config value for `db_max_connections`: {value}. Expected range: 1..=20");
        }
        if let Some(value) = self.db_busy_timeout_ms
            && value > 120_000
        {
            bail!(
                "Invalid config value for `db_busy_timeout_ms`: {value}. Expected range: 0..=120000"
            );
        }
        if let Some(path) = &self.db_path
            && path.as_os_str().is_empty()
        {
            bail!("Invalid config value for `db_path`: must not be empty");
        }
        Ok(())
    }
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Returns the stable string label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Verbose => "verbose",
            Self::Quiet => "quiet",
            Self::Debug => "debug",
        }
    }

    /// Tracing filter level for this setting.
    #[must_use]
    pub fn log_level(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if a base directory is known.
    pub path: Option<PathBuf>,
    /// Parsed file config when a config file exists and was valid.
    pub config: Option<FileConfig>,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Effective settings after merging CLI flags over file config over defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub database: DatabaseOptions,
    pub ledger: LedgerOptions,
    pub verbosity: VerbositySetting,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/shelfmark/config.toml`
/// 2. `$HOME/.config/shelfmark/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join(APP_DIR).join(CONFIG_FILE));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILE),
    )
}

/// Resolves the default database path.
///
/// Priority:
/// 1. `$XDG_DATA_HOME/shelfmark/shelfmark.db`
/// 2. `$HOME/.local/share/shelfmark/shelfmark.db`
/// 3. `./shelfmark.db`
#[must_use]
pub fn resolve_default_db_path() -> PathBuf {
    if let Some(xdg_data_home) = env_var_non_empty_os("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join(APP_DIR).join(DB_FILE);
    }
    env_var_non_empty_os("HOME").map_or_else(
        || PathBuf::from(DB_FILE),
        |home| {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join(APP_DIR)
                .join(DB_FILE)
        },
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given (it must exist), else from the default path if present.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config: Some(config),
            loaded_from_file: true,
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref() else {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    };

    if !path_ref.exists() {
        return Ok(LoadedConfig {
            path,
            config: None,
            loaded_from_file: false,
        });
    }

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config: Some(config),
        loaded_from_file: true,
    })
}

/// Merges CLI flags over file config over built-in defaults.
#[must_use]
pub fn resolve_settings(cli: &Cli, file: Option<&FileConfig>) -> Settings {
    let file = file.cloned().unwrap_or_default();

    let db_path = cli
        .db
        .clone()
        .or(file.db_path)
        .unwrap_or_else(resolve_default_db_path);

    let database = DatabaseOptions {
        max_connections: file.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        busy_timeout_ms: file.db_busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS),
    };

    let dedup = cli.dedup || file.dedup_on_load.unwrap_or(false);
    let ledger = LedgerOptions {
        load_policy: if dedup {
            LoadPolicy::Normalize
        } else {
            LoadPolicy::Preserve
        },
        serialize_writes: cli.serialize_writes || file.serialize_writes.unwrap_or(false),
    };

    // Priority: quiet flag > verbose flag > config file > default
    let verbosity = if cli.quiet {
        VerbositySetting::Quiet
    } else {
        match cli.verbose {
            0 => file.verbosity.unwrap_or(VerbositySetting::Default),
            1 => VerbositySetting::Verbose,
            _ => VerbositySetting::Debug,
        }
    };

    Settings {
        db_path,
        database,
        ledger,
        verbosity,
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();

        match key {
            "db_path" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `db_path` value on line {line_no}"))?;
                cfg.db_path = Some(PathBuf::from(parsed));
            }
            "db_max_connections" => {
                let parsed = parse_integer_u32(value).with_context(|| {
                    format!("Invalid `db_max_connections` value on line {line_no}")
                })?;
                cfg.db_max_connections = Some(parsed);
            }
            "db_busy_timeout_ms" => {
                let parsed = parse_integer_u32(value).with_context(|| {
                    format!("Invalid `db_busy_timeout_ms` value on line {line_no}")
                })?;
                cfg.db_busy_timeout_ms = Some(parsed);
            }
            "dedup_on_load" => {
                let parsed = parse_boolean(value)
                    .with_context(|| format!("Invalid `dedup_on_load` value on line {line_no}"))?;
                cfg.dedup_on_load = Some(parsed);
            }
            "serialize_writes" => {
                let parsed = parse_boolean(value).with_context(|| {
                    format!("Invalid `serialize_writes` value on line {line_no}")
                })?;
                cfg.serialize_writes = Some(parsed);
            }
            "verbosity" => {
                let parsed = parse_string_literal(value)
                    .with_context(|| format!("Invalid `verbosity` value on line {line_no}"))?;
                cfg.verbosity = Some(parse_verbosity(&parsed).with_context(|| {
                    format!("Invalid `verbosity` value '{parsed}' on line {line_no}")
                })?);
            }
            unknown => bail!("Unknown config key `{unknown}` on line {line_no}"),
        }
    }

    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(value: &str) -> Result<String> {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        bail!("expected a double-quoted string");
    };
    if inner.contains('"') {
        bail!("unexpected quote inside string");
    }
    Ok(inner.to_string())
}

fn parse_integer_u32(value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .with_context(|| format!("expected a non-negative integer, got '{value}'"))
}

fn parse_boolean(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => bail!("expected true or false, got '{other}'"),
    }
}

fn parse_verbosity(value: &str) -> Result<VerbositySetting> {
    match value {
        "default" => Ok(VerbositySetting::Default),
        "verbose" => Ok(VerbositySetting::Verbose),
        "quiet" => Ok(VerbositySetting::Quiet),
        "debug" => Ok(VerbositySetting::Debug),
        other => bail!("expected one of default, verbose, quiet, debug; got '{other}'"),
    }
}
