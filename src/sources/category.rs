use std::sync::Arc;

use crate::backend::CatalogBackend;
use crate::error::FetchError;
use crate::model::Category;
use crate::reactive::{from_future, Cached, ViewStream};
use crate::sources::log_result;

/// Category list, fetched once and shared.
pub struct CategorySource {
    backend: Arc<dyn CatalogBackend>,
    cache: Cached<Arc<Vec<Category>>>,
}

impl CategorySource {
    pub fn new(backend: Arc<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            cache: Cached::new(),
        }
    }

    pub async fn categories(&self) -> Result<Arc<Vec<Category>>, FetchError> {
        let backend = Arc::clone(&self.backend);
        self.cache
            .get_or_fetch(|| async move {
                let result = backend.categories().await;
                log_result("categories", &result);
                if let Ok(categories) = &result {
                    tracing::debug!(count = categories.len(), "Categories fetched");
                }
                result.map(Arc::new)
            })
            .await
    }

    /// The category list as a stream; subscribing fetches it if needed and
    /// retries a fetch that failed earlier.
    pub fn stream(self: &Arc<Self>) -> ViewStream<Arc<Vec<Category>>> {
        self.retry_failed();
        let this = Arc::clone(self);
        from_future(async move { this.categories().await })
    }

    /// Cached list without fetching.
    pub fn cached(&self) -> Option<Arc<Vec<Category>>> {
        self.cache.peek()
    }

    /// Let the next call refetch if the last attempt failed.
    pub fn retry_failed(&self) {
        if self.cache.clear_failure() {
            tracing::debug!("Retrying failed category fetch");
        }
    }

    pub fn reload(&self) {
        tracing::info!("Category cache invalidated");
        self.cache.invalidate();
    }
}
