use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::CoreError;
use crate::storage::format::DEFAULT_SLOT;

/// Recent transactions shown to the advisor when nothing else is configured.
pub const DEFAULT_RECENT_WINDOW: usize = 20;

/// Host-level configuration: where the snapshot lives and how to reach the
/// advisory collaborators. Read from a JSON file, every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// File backing the snapshot slot. `None` means `<DEFAULT_SLOT>.json`
    /// in the working directory.
    pub snapshot_path: Option<PathBuf>,

    /// API keys per provider name (e.g., "gemini").
    pub api_keys: HashMap<String, String>,

    /// Model name sent to the Gemini API.
    pub advisor_model: String,

    /// How many of the most recent transactions the advisor gets to see.
    pub recent_transaction_window: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            snapshot_path: None,
            api_keys: HashMap::new(),
            advisor_model: "gemini-2.0-flash".to_string(),
            recent_transaction_window: DEFAULT_RECENT_WINDOW,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CoreError::StorageUnavailable(format!("Failed to read settings {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            CoreError::ValidationError(format!("Invalid settings file {}: {e}", path.display()))
        })
    }

    /// Overlay environment variables:
    /// `ZENWEALTH_SNAPSHOT_PATH`, and `GEMINI_API_KEY` (or `API_KEY`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("ZENWEALTH_SNAPSHOT_PATH") {
            if !path.trim().is_empty() {
                self.snapshot_path = Some(PathBuf::from(path));
            }
        }
        let key = std::env::var("GEMINI_API_KEY").or_else(|_| std::env::var("API_KEY"));
        if let Ok(key) = key {
            if !key.trim().is_empty() {
                self.api_keys.insert("gemini".to_string(), key);
            }
        }
        self
    }

    /// Resolved snapshot file path.
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{DEFAULT_SLOT}.json")))
    }

    pub fn api_key(&self, provider: &str) -> Option<&str> {
        self.api_keys
            .get(provider)
            .map(String::as_str)
            .filter(|k| !k.trim().is_empty())
    }
}
