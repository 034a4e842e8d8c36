//! The HTTP seam of the catalog.
//!
//! Sources talk to the backend only through [`CatalogBackend`], so the
//! reqwest-based [`HttpBackend`] can be swapped for an in-memory one.

mod http;

use async_trait::async_trait;

use crate::error::FetchError;
use crate::model::{Category, Product, Supplier, SupplierId};

pub use http::{BackendError, HttpBackend};

/// Read-only catalog API. Each call issues one request and resolves once.
#[async_trait]
pub trait CatalogBackend: Send + Sync + 'static {
    /// `GET /products`: products as stored, before markup.
    async fn products(&self) -> Result<Vec<Product>, FetchError>;

    /// `GET /categories`
    async fn categories(&self) -> Result<Vec<Category>, FetchError>;

    /// `GET /suppliers`
    async fn suppliers(&self) -> Result<Vec<Supplier>, FetchError>;

    /// `GET /suppliers/{id}`
    async fn supplier(&self, id: SupplierId) -> Result<Supplier, FetchError>;
}
