//! Application configuration read from the environment

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use latte_config::LatteConfig;
use tracing::warn;

/// Default PNG written when `LATTE_OUTPUT` is unset
pub const DEFAULT_OUTPUT: &str = "latte.png";

/// Where the headless host reads its inputs and writes its output
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON `LatteConfig` (`LATTE_CONFIG`); defaults when unset
    pub config_path: Option<PathBuf>,
    /// JSON replay script (`LATTE_SCRIPT`); a built-in demo when unset
    pub script_path: Option<PathBuf>,
    /// PNG destination (`LATTE_OUTPUT`)
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            script_path: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl AppConfig {
    /// Parse from `LATTE_CONFIG`, `LATTE_SCRIPT` and `LATTE_OUTPUT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            config_path: non_empty("LATTE_CONFIG").map(PathBuf::from),
            script_path: non_empty("LATTE_SCRIPT").map(PathBuf::from),
            output: non_empty("LATTE_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        }
    }

    /// Load the canvas configuration, snapped into editor ranges and validated
    pub fn load_latte_config(&self) -> Result<LatteConfig> {
        let config = match &self.config_path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<LatteConfig>(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => LatteConfig::default(),
        };
        settle(config)
    }
}

fn settle(config: LatteConfig) -> Result<LatteConfig> {
    let clamped = config.clone().clamped();
    if clamped != config {
        warn!("config values outside editor ranges were clamped: {clamped:?}");
    }
    clamped.validate().context("validating config")?;
    Ok(clamped)
}
