use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/catalog-view/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("catalog-view").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - `api.base_url` is an absolute URL
    /// - `catalog.price_markup` is finite and positive
    /// - `catalog.fanout_limit` is at least 1
    /// - `catalog.demo_supplier_ids` is not empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(e) = reqwest::Url::parse(&self.api.base_url) {
            return Err(ConfigError::ValidationError {
                message: format!("Invalid api.base_url '{}': {}", self.api.base_url, e),
            });
        }

        let markup = self.catalog.price_markup;
        if !markup.is_finite() || markup <= 0.0 {
            return Err(ConfigError::ValidationError {
                message: format!("catalog.price_markup must be positive, got {}", markup),
            });
        }

        if self.catalog.fanout_limit == 0 {
            return Err(ConfigError::ValidationError {
                message: "catalog.fanout_limit must be at least 1".to_string(),
            });
        }

        if self.catalog.demo_supplier_ids.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "catalog.demo_supplier_ids must not be empty".to_string(),
            });
        }

        Ok(())
    }
}
