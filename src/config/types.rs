use serde::{Deserialize, Serialize};

use crate::model::SupplierId;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API location and HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog API (e.g., "http://localhost:4200").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the product list, relative to `base_url`.
    #[serde(default = "default_products_path")]
    pub products_path: String,
    /// Path of the category list, relative to `base_url`.
    #[serde(default = "default_categories_path")]
    pub categories_path: String,
    /// Path of the supplier list; single suppliers live at `{path}/{id}`.
    #[serde(default = "default_suppliers_path")]
    pub suppliers_path: String,
    /// Total request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Catalog composition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Factor applied to every backend price (default: 1.5).
    #[serde(default = "default_price_markup")]
    pub price_markup: f64,
    /// Supplier ids fetched by the fan-out demonstration pipelines.
    #[serde(default = "default_demo_supplier_ids")]
    pub demo_supplier_ids: Vec<SupplierId>,
    /// Max in-flight requests for concurrent fan-out (default: 8).
    #[serde(default = "default_fanout_limit")]
    pub fanout_limit: usize,
}

/// Diagnostic logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_base_url() -> String {
    "http://localhost:4200".to_string()
}

fn default_products_path() -> String {
    "api/products".to_string()
}

fn default_categories_path() -> String {
    "api/productCategories".to_string()
}

fn default_suppliers_path() -> String {
    "api/suppliers".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_price_markup() -> f64 {
    1.5
}

fn default_demo_supplier_ids() -> Vec<SupplierId> {
    vec![1, 5, 8]
}

fn default_fanout_limit() -> usize {
    8
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            products_path: default_products_path(),
            categories_path: default_categories_path(),
            suppliers_path: default_suppliers_path(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            price_markup: default_price_markup(),
            demo_supplier_ids: default_demo_supplier_ids(),
            fanout_limit: default_fanout_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
