// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::day::DEFAULT_NOTE_SUFFIX;
use crate::model::{AggregateOptions, IdentityPolicy};
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_INSERT_MARKER: &str = "<!-- daily-tasks -->";

fn default_note_suffix() -> String {
    DEFAULT_NOTE_SUFFIX.to_string()
}
fn default_insert_marker() -> String {
    DEFAULT_INSERT_MARKER.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Directory holding the daily notes. Unset means the working directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_dir: Option<PathBuf>,
    #[serde(default = "default_note_suffix")]
    pub note_suffix: String,
    /// Whether today's own note takes part in the rollup.
    #[serde(default)]
    pub include_today: bool,
    #[serde(default)]
    pub identity_policy: IdentityPolicy,
    #[serde(default = "default_insert_marker")]
    pub insert_marker: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub aggregate: AggregateOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notes_dir: None,
            note_suffix: default_note_suffix(),
            include_today: false,
            identity_policy: IdentityPolicy::default(),
            insert_marker: default_insert_marker(),
            log_level: default_log_level(),
            aggregate: AggregateOptions::default(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults. Any other failure
    /// (unreadable, malformed) is still an error.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Detect whether an error means the config file was simply absent.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
