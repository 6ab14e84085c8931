//! Configuration loading and types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use lumiere_client::DEFAULT_ADDRESS_URL;

use crate::error::Result;

/// Top-level configuration shared by the TUI and CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Backend endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Lumiere backend
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the province/district/ward dataset
    #[serde(default = "default_address_url")]
    pub address_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            address_url: default_address_url(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_address_url() -> String {
    DEFAULT_ADDRESS_URL.to_string()
}

/// Terminal UI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop tick in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            log_level: default_log_level(),
        }
    }
}

fn default_tick_rate() -> u64 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Where the cookie jar lives
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_file: Option<PathBuf>,
}

impl SessionConfig {
    /// Configured jar, else `<data dir>/lumiere/cookies.json`
    pub fn cookie_path(&self) -> PathBuf {
        self.cookie_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("lumiere/cookies.json")
        })
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load from default paths or use defaults
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed
    pub fn load_default() -> Result<Self> {
        if let Ok(path) = std::env::var("LUMIERE_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let paths = [
            Some(PathBuf::from("lumiere.toml")),
            dirs::config_dir().map(|p| p.join("lumiere/lumiere.toml")),
        ];

        for path in paths.into_iter().flatten() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Self::load(&path);
            }
        }

        tracing::debug!("no config file found, using defaults");
        Ok(Config::default())
    }
}
