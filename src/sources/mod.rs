//! Data sources: each owns its backend fetches, their caches, and the
//! actions that feed its derived streams.

mod category;
mod fanout;
mod product;
mod supplier;

use std::sync::Arc;

use serde::Serialize;

use crate::backend::CatalogBackend;
use crate::config::CatalogConfig;
use crate::error::FetchError;

pub use category::CategorySource;
pub use fanout::{fetch_many, FetchPolicy};
pub use product::ProductSource;
pub use supplier::SupplierSource;

/// The three sources wired to one backend.
#[derive(Clone)]
pub struct Sources {
    pub categories: Arc<CategorySource>,
    pub suppliers: Arc<SupplierSource>,
    pub products: Arc<ProductSource>,
}

impl Sources {
    pub fn new(backend: Arc<dyn CatalogBackend>, config: &CatalogConfig) -> Self {
        let categories = Arc::new(CategorySource::new(Arc::clone(&backend)));
        let suppliers = Arc::new(SupplierSource::new(Arc::clone(&backend), config));
        let products = Arc::new(ProductSource::new(
            backend,
            Arc::clone(&categories),
            config,
        ));
        Self {
            categories,
            suppliers,
            products,
        }
    }
}

/// Record a fetch outcome in the diagnostic log.
fn log_result<T: Serialize>(what: &'static str, result: &Result<T, FetchError>) {
    match result {
        Ok(value) => {
            tracing::trace!(
                what,
                payload = %serde_json::to_string(value).unwrap_or_default(),
                "Fetched"
            );
        }
        Err(error) => {
            tracing::error!(what, error = ?error, "{}", error);
        }
    }
}
