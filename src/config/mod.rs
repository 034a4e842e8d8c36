//! Configuration for the catalog client.
//!
//! Loaded from `config.toml` in the platform config directory; every
//! field has a default so a missing file or a partial file is fine.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, CatalogConfig, Config, LoggingConfig};
