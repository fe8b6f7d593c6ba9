//! Client configuration.
//!
//! Layers, later wins: built-in defaults, `~/.agrichat/config.json` (or the
//! file given with `--config`), command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Directory under the home directory holding config and state.
const DATA_DIR: &str = ".agrichat";

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:10000";

pub const DEFAULT_WELCOME: &str =
    "Hello! I'm your Agricultural Disease Expert. How can I help you today?";

/// Settings for talking to the chat backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the API endpoints are resolved against.
    pub base_url: String,
    /// Per-request timeout in seconds. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,
    /// Bot message shown for sessions without history.
    pub welcome_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            welcome_message: DEFAULT_WELCOME.to_string(),
        }
    }
}

impl Config {
    /// Load from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Apply command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, base_url: Option<String>, timeout_secs: Option<u64>) -> Self {
        if let Some(base_url) = base_url {
            self.base_url = base_url;
        }
        if timeout_secs.is_some() {
            self.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// `~/.agrichat`.
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(DATA_DIR))
}
