//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the server URL and the last used username.
//!
//! Configuration is stored at `~/.config/codecheck/config.json`; the
//! session store and logs live under the platform data directory.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "codecheck";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Server used when neither the environment nor the config names one
const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

/// Environment variable overriding the configured server URL
const SERVER_URL_ENV: &str = "CODECHECK_SERVER_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub last_username: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve the server base URL: environment wins, then config, then
    /// the compiled-in default.
    pub fn server_url(&self) -> String {
        std::env::var(SERVER_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
    }

    /// Directory holding the session store and logs
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_falls_back_to_default() {
        let config = Config::default();
        if std::env::var(SERVER_URL_ENV).is_err() {
            assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        }
    }

    #[test]
    fn test_server_url_prefers_configured_value() {
        let config = Config {
            server_url: Some("https://codecheck.example.edu".to_string()),
            ..Default::default()
        };
        if std::env::var(SERVER_URL_ENV).is_err() {
            assert_eq!(config.server_url(), "https://codecheck.example.edu");
        }
    }
}
