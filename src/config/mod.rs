//! Configuration management

mod settings;

pub use settings::Settings;

use crate::pipeline::{SortBy, SortOrder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Environment variable overriding `service.base_url`
pub const API_URL_ENV: &str = "POKERDECK_API_URL";

/// Environment variable overriding `appearance.theme`
pub const THEME_ENV: &str = "POKERDECK_THEME";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub view: ViewConfig,
    pub appearance: AppearanceConfig,
}

/// Session service connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the session service API
    pub base_url: String,

    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Initial list view settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Appearance settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub theme: ThemeMode,

    /// Colour tags and dim hidden sessions
    pub colors: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::Dark,
            colors: true,
        }
    }
}

/// Light or dark colour palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        })
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("Unknown theme '{}' (expected light or dark)", other)),
        }
    }
}

impl Config {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from `path`, or return defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pokerdeck")
            .join("config.toml")
    }

    /// Apply `POKERDECK_*` environment overrides
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_overrides(
            std::env::var(API_URL_ENV).ok(),
            std::env::var(THEME_ENV).ok(),
        )
    }

    /// Apply explicit overrides; `None` leaves the current value
    pub fn apply_overrides(
        mut self,
        api_url: Option<String>,
        theme: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            self.service.base_url = url.trim().to_string();
        }
        if let Some(theme) = theme {
            self.appearance.theme = theme
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "appearance.theme",
                    message,
                })?;
        }
        Ok(self)
    }
}
