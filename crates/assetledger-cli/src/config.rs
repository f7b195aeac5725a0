use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use assetledger_contract::ComparisonMode;

/// Output format for log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Top-level configuration for assetledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetLedgerConfig {
    /// Comparison run by `compare`: "legacy" or "strict".
    #[serde(default)]
    pub comparison_mode: ComparisonMode,

    /// Default tracing filter; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AssetLedgerConfig {
    fn default() -> Self {
        Self {
            comparison_mode: ComparisonMode::default(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl AssetLedgerConfig {
    /// Default state directory: `~/.assetledger/` or `$ASSETLEDGER_STATE_DIR`.
    pub fn default_state_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("ASSETLEDGER_STATE_DIR") {
            PathBuf::from(dir)
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".assetledger")
        }
    }

    /// Config file path within the state directory.
    pub fn config_path(state_dir: &Path) -> PathBuf {
        state_dir.join("config.toml")
    }

    /// Load config from disk. Returns default if not found.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = Self::config_path(state_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn save(&self, state_dir: &Path) -> Result<()> {
        let path = Self::config_path(state_dir);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, content).context("Failed to write config file")?;
        Ok(())
    }
}
