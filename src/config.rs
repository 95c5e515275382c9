/// Configuration for a conversion run.
///
/// Every field has a default, so the JSON file only needs the keys it
/// overrides. Without `--config` the defaults are used as-is.
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ConvertError, Result};

// ── Default value functions ──────────────────────────────────────────

fn default_true() -> bool {
    true
}

fn default_progress_log_interval() -> usize {
    10_000
}

fn default_top_types() -> usize {
    10
}

// ── Config struct ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Relax durability pragmas while loading.
    #[serde(default = "default_true")]
    pub bulk_load: bool,

    /// Show a progress bar over the insert loop.
    #[serde(default = "default_true")]
    pub progress: bool,

    #[serde(default = "default_progress_log_interval")]
    pub progress_log_interval: usize,

    /// Run the FTS5 `optimize` command after the index is populated.
    #[serde(default = "default_true")]
    pub optimize_fts: bool,

    /// How many type tags to include in the distribution log.
    #[serde(default = "default_top_types")]
    pub top_types: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bulk_load: default_true(),
            progress: default_true(),
            progress_log_interval: default_progress_log_interval(),
            optimize_fts: default_true(),
            top_types: default_top_types(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("failed to read {}: {e}", path.display()))
        })?;

        let cfg: Config = serde_json::from_str(&data).map_err(|e| {
            ConvertError::Config(format!("invalid JSON in {}: {e}", path.display()))
        })?;
        cfg.validate()?;

        info!("Loaded configuration from {}", path.display());
        Ok(cfg)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.progress_log_interval == 0 {
            return Err(ConvertError::Config(
                "progress_log_interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
