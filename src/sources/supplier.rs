use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};

use crate::backend::CatalogBackend;
use crate::config::CatalogConfig;
use crate::error::FetchError;
use crate::model::{Supplier, SupplierId};
use crate::reactive::{from_future, Cached, ViewStream};
use crate::sources::fanout::{fetch_many, FetchPolicy};
use crate::sources::log_result;

/// Supplier list (fetched once and shared) and per-id supplier fetches.
pub struct SupplierSource {
    backend: Arc<dyn CatalogBackend>,
    all: Cached<Arc<Vec<Supplier>>>,
    demo_ids: Vec<SupplierId>,
    fanout_limit: usize,
}

impl SupplierSource {
    pub fn new(backend: Arc<dyn CatalogBackend>, config: &CatalogConfig) -> Self {
        Self {
            backend,
            all: Cached::new(),
            demo_ids: config.demo_supplier_ids.clone(),
            fanout_limit: config.fanout_limit,
        }
    }

    pub async fn suppliers(&self) -> Result<Arc<Vec<Supplier>>, FetchError> {
        let backend = Arc::clone(&self.backend);
        self.all
            .get_or_fetch(|| async move {
                let result = backend.suppliers().await;
                log_result("suppliers", &result);
                result.map(Arc::new)
            })
            .await
    }

    /// The supplier list as a stream; subscribing fetches it if needed and
    /// retries a fetch that failed earlier.
    pub fn stream(self: &Arc<Self>) -> ViewStream<Arc<Vec<Supplier>>> {
        self.all.clear_failure();
        let this = Arc::clone(self);
        from_future(async move { this.suppliers().await })
    }

    pub async fn supplier(&self, id: SupplierId) -> Result<Supplier, FetchError> {
        fetch_supplier(self.backend.as_ref(), id).await
    }

    /// Fetch each id in `ids` under `policy`.
    pub fn fetch_many(
        &self,
        policy: FetchPolicy,
        ids: BoxStream<'static, SupplierId>,
    ) -> BoxStream<'static, Result<Supplier, FetchError>> {
        let backend = Arc::clone(&self.backend);
        fetch_many(policy, ids, self.fanout_limit, move |id| {
            let backend = Arc::clone(&backend);
            async move { fetch_supplier(backend.as_ref(), id).await }
        })
    }

    /// Fetch the configured demo ids under `policy`.
    pub fn demo(&self, policy: FetchPolicy) -> BoxStream<'static, Result<Supplier, FetchError>> {
        let ids = stream::iter(self.demo_ids.clone())
            .inspect(move |id| tracing::debug!(?policy, id, "Source emitted supplier id"))
            .boxed();
        self.fetch_many(policy, ids)
    }

    pub fn demo_ids(&self) -> &[SupplierId] {
        &self.demo_ids
    }

    pub fn reload(&self) {
        tracing::info!("Supplier cache invalidated");
        self.all.invalidate();
    }
}

pub(crate) async fn fetch_supplier(
    backend: &dyn CatalogBackend,
    id: SupplierId,
) -> Result<Supplier, FetchError> {
    let result = backend.supplier(id).await;
    log_result("supplier", &result);
    if let Ok(supplier) = &result {
        tracing::debug!(id = supplier.id, name = %supplier.supplier_name, "Supplier fetched");
    }
    result
}
