use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::{try_join_all, BoxFuture, FutureExt};
use parking_lot::Mutex;

use crate::backend::CatalogBackend;
use crate::catalog::{
    annotate_added, join_categories, placeholder_product, ProductListIntent, ProductListReducer,
    ProductListState,
};
use crate::config::CatalogConfig;
use crate::error::FetchError;
use crate::model::{Product, ProductId, Supplier};
use crate::mvi::Reducer;
use crate::reactive::{combine_latest, Cached, Publisher, ViewStream};
use crate::sources::category::CategorySource;
use crate::sources::log_result;
use crate::sources::supplier::fetch_supplier;

enum SupplierStep {
    Selected(Option<Result<Option<Product>, FetchError>>),
    Fetched(Result<Vec<Supplier>, FetchError>),
}

/// A finished category join, tagged with the reload generation it was
/// started in.
#[derive(Clone)]
struct Joined {
    generation: u64,
    products: Arc<Vec<Product>>,
}

/// Products joined with their categories, the running list with local
/// additions, and the current selection.
pub struct ProductSource {
    backend: Arc<dyn CatalogBackend>,
    categories: Arc<CategorySource>,
    markup: f64,
    base: Arc<Cached<Arc<Vec<Product>>>>,
    joined: Cached<Joined>,
    generation: AtomicU64,
    applied: Mutex<Option<u64>>,
    state: Mutex<ProductListState>,
    running: Publisher<Vec<Product>>,
    selected_id: Publisher<ProductId>,
}

impl ProductSource {
    pub fn new(
        backend: Arc<dyn CatalogBackend>,
        categories: Arc<CategorySource>,
        config: &CatalogConfig,
    ) -> Self {
        Self {
            backend,
            categories,
            markup: config.price_markup,
            base: Arc::new(Cached::new()),
            joined: Cached::new(),
            generation: AtomicU64::new(0),
            applied: Mutex::new(None),
            state: Mutex::new(ProductListState::default()),
            running: Publisher::new(),
            selected_id: Publisher::with_value(0),
        }
    }

    /// Products as the backend serves them. Cached.
    pub async fn base_products(&self) -> Result<Arc<Vec<Product>>, FetchError> {
        fetch_base(Arc::clone(&self.backend), &self.base).await
    }

    /// Products joined with categories and marked up. Cached; the first
    /// caller to see a fresh join replaces the running list with it.
    pub async fn products_with_category(&self) -> Result<Arc<Vec<Product>>, FetchError> {
        let generation = self.generation.load(Ordering::SeqCst);
        let backend = Arc::clone(&self.backend);
        let base = Arc::clone(&self.base);
        let categories = Arc::clone(&self.categories);
        let markup = self.markup;

        let joined = self
            .joined
            .get_or_fetch(|| async move {
                let (products, categories) =
                    tokio::try_join!(fetch_base(backend, &base), categories.categories())?;
                Ok(Joined {
                    generation,
                    products: Arc::new(join_categories(&products, &categories, markup)),
                })
            })
            .await?;

        self.apply_join(&joined);
        Ok(joined.products)
    }

    /// Make sure the running list has been filled from the backend.
    ///
    /// A failure before the list ever held a value fails the running list.
    pub async fn load(&self) -> Result<(), FetchError> {
        let result = self.products_with_category().await.map(|_| ());
        if let Err(error) = &result {
            if self.running.latest().is_none() {
                self.running.fail(error.clone());
            }
        }
        result
    }

    /// Refetch products and replace the running list. Local additions made
    /// before the reload are dropped with the old list, and a join still in
    /// flight from before the reload is discarded when it lands.
    pub async fn reload(&self) -> Result<(), FetchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(generation, "Reloading products");
        self.base.invalidate();
        self.joined.invalidate();
        self.load().await
    }

    /// The running list: last joined product list plus local additions.
    ///
    /// Subscribing starts the fetch if it has not happened yet. Subscribers
    /// arriving together share one attempt; one arriving after that attempt
    /// failed retries it.
    pub fn products(self: &Arc<Self>) -> ViewStream<Vec<Product>> {
        if self.running.clear_failure() {
            tracing::debug!("Retrying failed product load");
            self.base.clear_failure();
            self.joined.clear_failure();
            self.categories.retry_failed();
        }
        let stream = self.running.subscribe();
        let this = Arc::clone(self);
        tokio::spawn(async move {
            let _ = this.load().await;
        });
        stream
    }

    /// Current running list without waiting.
    pub fn snapshot(&self) -> Vec<Product> {
        self.state.lock().products.clone()
    }

    /// Append `product` (or the placeholder product) to the running list.
    ///
    /// Nothing is sent to the backend.
    pub fn add_product(&self, product: Option<Product>) {
        let product = product.unwrap_or_else(placeholder_product);
        let categories = self.categories.cached();
        let product = annotate_added(
            product,
            categories.as_deref().map(|c| c.as_slice()),
            self.markup,
        );
        tracing::debug!(id = product.id, name = %product.product_name, "Product added");
        self.dispatch(ProductListIntent::Append(product));
    }

    pub fn select_product(&self, id: ProductId) {
        tracing::debug!(id, "Product selection changed");
        self.selected_id.emit(id);
    }

    pub fn selected_id(&self) -> ProductId {
        self.selected_id.latest().unwrap_or(0)
    }

    /// The running-list entry matching the selected id, re-evaluated when
    /// either changes. `None` when nothing matches.
    pub fn selected_product(self: &Arc<Self>) -> ViewStream<Option<Product>> {
        combine_latest(
            self.products(),
            self.selected_id.subscribe(),
            |products: &Vec<Product>, id: &ProductId| {
                let product = products.iter().find(|p| p.id == *id).cloned();
                tracing::debug!(
                    id,
                    name = product.as_ref().map(|p| p.product_name.as_str()),
                    "Selected product"
                );
                product
            },
        )
    }

    /// Suppliers of the selected product, all fetched concurrently and
    /// emitted together.
    ///
    /// A new selection discards fetches still pending for the previous one.
    /// No selection, or a product without supplier ids, yields an empty list.
    /// Emitting on "no selection" differs from skipping it: the detail view
    /// then always has a supplier list to combine, and a deselection clears
    /// the suppliers of the previous product.
    pub fn selected_product_suppliers(self: &Arc<Self>) -> ViewStream<Vec<Supplier>> {
        let mut selected = self.selected_product();
        let backend = Arc::clone(&self.backend);
        let out = Publisher::new();
        let stream = out.subscribe();

        tokio::spawn(async move {
            let mut inflight: Option<BoxFuture<'static, Result<Vec<Supplier>, FetchError>>> = None;
            let mut current: Option<Option<Product>> = None;
            let mut selection_open = true;

            while selection_open || inflight.is_some() {
                let step = {
                    let pending = async {
                        match inflight.as_mut() {
                            Some(fetch) => fetch.await,
                            None => std::future::pending().await,
                        }
                    };
                    tokio::select! {
                        _ = out.closed() => break,
                        item = selected.next(), if selection_open => SupplierStep::Selected(item),
                        result = pending => SupplierStep::Fetched(result),
                    }
                };

                match step {
                    SupplierStep::Selected(Some(Ok(product))) => {
                        if current.as_ref() == Some(&product) {
                            continue;
                        }
                        if inflight.is_some() {
                            tracing::debug!("Discarding supplier fetch for previous selection");
                        }
                        current = Some(product.clone());
                        inflight = Some(product_suppliers(Arc::clone(&backend), product).boxed());
                    }
                    SupplierStep::Selected(Some(Err(error))) => {
                        out.fail(error);
                        break;
                    }
                    SupplierStep::Selected(None) => selection_open = false,
                    SupplierStep::Fetched(Ok(suppliers)) => {
                        inflight = None;
                        out.emit(suppliers);
                    }
                    SupplierStep::Fetched(Err(error)) => {
                        out.fail(error);
                        break;
                    }
                }
            }
        });

        stream
    }

    /// Refresh the running list from `joined` unless a reload superseded it
    /// or it was already applied.
    fn apply_join(&self, joined: &Joined) {
        if joined.generation != self.generation.load(Ordering::SeqCst) {
            tracing::debug!(generation = joined.generation, "Discarding stale product join");
            return;
        }
        let mut applied = self.applied.lock();
        if *applied == Some(joined.generation) {
            return;
        }
        *applied = Some(joined.generation);
        self.dispatch(ProductListIntent::Refresh(joined.products.as_ref().clone()));
    }

    fn dispatch(&self, intent: ProductListIntent) {
        let mut state = self.state.lock();
        ProductListReducer::apply(&mut state, intent);
        self.running.emit(state.products.clone());
    }
}

async fn fetch_base(
    backend: Arc<dyn CatalogBackend>,
    cache: &Cached<Arc<Vec<Product>>>,
) -> Result<Arc<Vec<Product>>, FetchError> {
    cache
        .get_or_fetch(|| async move {
            let result = backend.products().await;
            log_result("products", &result);
            if let Ok(products) = &result {
                tracing::debug!(count = products.len(), "Products fetched");
            }
            result.map(Arc::new)
        })
        .await
}

async fn product_suppliers(
    backend: Arc<dyn CatalogBackend>,
    product: Option<Product>,
) -> Result<Vec<Supplier>, FetchError> {
    let Some(product) = product else {
        return Ok(Vec::new());
    };

    let ids = product.supplier_ids();
    let suppliers = try_join_all(ids.iter().map(|id| fetch_supplier(backend.as_ref(), *id))).await?;
    tracing::debug!(
        product = product.id,
        suppliers = ?suppliers.iter().map(|s| s.id).collect::<Vec<_>>(),
        "Product suppliers fetched"
    );
    Ok(suppliers)
}
