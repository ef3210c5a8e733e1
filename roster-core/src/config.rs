//! Configuration management
//!
//! settings.json format in the roster directory:
//! ```json
//! {
//!   "server": { "baseUrl": "http://localhost:8080" }
//! }
//! ```
//!
//! Fields the console does not manage are preserved on save.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Default directory server, matching the backend's development setup
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    server: ServerSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServerSettings {
    #[serde(default = "default_server_url")]
    base_url: String,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_server_url(),
            other: HashMap::new(),
        }
    }
}

/// Roster configuration (simplified view of settings)
#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
        }
    }
}

impl Config {
    /// Load config from the roster directory
    ///
    /// A missing or unreadable settings file falls back to defaults. The
    /// effective server URL can still be overridden per invocation with
    /// the --server flag (or its ROSTER_SERVER_URL fallback).
    pub fn load(roster_dir: &Path) -> Result<Self> {
        let settings_path = roster_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        Ok(Self {
            server_url: raw.server.base_url,
        })
    }

    /// Save config to the roster directory
    ///
    /// Preserves settings the console does not manage.
    pub fn save(&self, roster_dir: &Path) -> Result<()> {
        let settings_path = roster_dir.join("settings.json");

        // Load existing settings to preserve fields we don't manage
        let mut settings = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)?;
            serde_json::from_str::<SettingsFile>(&content).unwrap_or_default()
        } else {
            SettingsFile::default()
        };

        // Update only the fields we manage
        settings.server.base_url = self.server_url.clone();

        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(&settings_path, content)?;
        Ok(())
    }
}
