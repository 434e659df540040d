//! User configuration.
//!
//! Supplies defaults for requests built from command-line flags. Request
//! files carry their own settings; flags override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use warikan_core::model::{DEFAULT_TILT, MAX_TILT};

/// Top-level warikan configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarikanConfig {
    /// Tilt the search starts from.
    #[serde(default = "default_tilt")]
    pub default_tilt: u8,
    /// Skip candidates that under-collect.
    #[serde(default)]
    pub shortfall_skip: bool,
    /// Currency label shown next to amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_tilt() -> u8 {
    DEFAULT_TILT
}
fn default_currency() -> String {
    "JPY".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./warikan-results")
}

impl Default for WarikanConfig {
    fn default() -> Self {
        Self {
            default_tilt: default_tilt(),
            shortfall_skip: false,
            currency: default_currency(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `warikan.toml` in the current directory
/// 2. `~/.config/warikan/config.toml`
///
/// Environment variable overrides: `WARIKAN_DEFAULT_TILT`, `WARIKAN_CURRENCY`.
pub fn load_config_from(path: Option<&Path>) -> Result<WarikanConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("warikan.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WarikanConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WarikanConfig::default(),
    };

    if let Ok(tilt) = std::env::var("WARIKAN_DEFAULT_TILT") {
        config.default_tilt = tilt
            .trim()
            .parse::<u8>()
            .with_context(|| format!("invalid WARIKAN_DEFAULT_TILT: '{tilt}'"))?;
    }

    if let Ok(currency) = std::env::var("WARIKAN_CURRENCY") {
        config.currency = currency;
    }

    anyhow::ensure!(
        config.default_tilt <= MAX_TILT,
        "default_tilt must be between 0 and {MAX_TILT}, got {}",
        config.default_tilt
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("warikan"))
}
