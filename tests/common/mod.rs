//! Shared test utilities: an in-memory backend and catalog fixtures.

#![allow(dead_code)]

pub mod mock_backend;

use std::collections::HashMap;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tempfile::TempDir;

use catalog_view::backend::CatalogBackend;
use catalog_view::config::CatalogConfig;
use catalog_view::model::{Category, Product, Supplier, SupplierId};
use catalog_view::reactive::ViewStream;
use catalog_view::{FetchError, Sources};

const WAIT: Duration = Duration::from_secs(5);

/// In-memory [`CatalogBackend`] with per-call counters, supplier delays and
/// injectable failures.
pub struct StubBackend {
    products: Mutex<Result<Vec<Product>, FetchError>>,
    products_delay: Mutex<u64>,
    categories: Mutex<Result<Vec<Category>, FetchError>>,
    suppliers: Vec<Supplier>,
    supplier_delays: Mutex<HashMap<SupplierId, u64>>,
    supplier_failures: Mutex<HashMap<SupplierId, FetchError>>,
    calls: Mutex<Vec<String>>,
    completed_suppliers: Mutex<Vec<SupplierId>>,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            products: Mutex::new(Ok(products())),
            products_delay: Mutex::new(0),
            categories: Mutex::new(Ok(categories())),
            suppliers: suppliers(),
            supplier_delays: Mutex::new(HashMap::new()),
            supplier_failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            completed_suppliers: Mutex::new(Vec::new()),
        })
    }

    pub fn set_products(&self, result: Result<Vec<Product>, FetchError>) {
        *self.products.lock() = result;
    }

    /// Delay later `products()` calls by `ms`. Each call answers with the
    /// products set when it started.
    pub fn delay_products(&self, ms: u64) {
        *self.products_delay.lock() = ms;
    }

    pub fn set_categories(&self, result: Result<Vec<Category>, FetchError>) {
        *self.categories.lock() = result;
    }

    pub fn delay_supplier(&self, id: SupplierId, ms: u64) {
        self.supplier_delays.lock().insert(id, ms);
    }

    pub fn fail_supplier(&self, id: SupplierId, error: FetchError) {
        self.supplier_failures.lock().insert(id, error);
    }

    /// Number of calls whose name starts with `prefix` ("products",
    /// "categories", "suppliers", "supplier/5").
    pub fn calls(&self, prefix: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.as_str() == prefix || c.starts_with(&format!("{prefix}/")))
            .count()
    }

    /// Supplier ids whose fetch ran to completion, in completion order.
    pub fn completed_suppliers(&self) -> Vec<SupplierId> {
        self.completed_suppliers.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }
}

#[async_trait]
impl CatalogBackend for StubBackend {
    async fn products(&self) -> Result<Vec<Product>, FetchError> {
        self.record("products".to_string());
        let result = self.products.lock().clone();
        let delay = *self.products_delay.lock();
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        result
    }

    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.record("categories".to_string());
        self.categories.lock().clone()
    }

    async fn suppliers(&self) -> Result<Vec<Supplier>, FetchError> {
        self.record("suppliers".to_string());
        Ok(self.suppliers.clone())
    }

    async fn supplier(&self, id: SupplierId) -> Result<Supplier, FetchError> {
        self.record(format!("supplier/{id}"));

        let delay = self.supplier_delays.lock().get(&id).copied().unwrap_or(0);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        if let Some(error) = self.supplier_failures.lock().get(&id).cloned() {
            return Err(error);
        }

        let supplier = self
            .suppliers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| FetchError::status(format!("api/suppliers/{id}"), 404, "Not Found"))?;
        self.completed_suppliers.lock().push(id);
        Ok(supplier)
    }
}

/// Sources over `backend` with default catalog settings.
pub fn sources(backend: &Arc<StubBackend>) -> Sources {
    let backend: Arc<dyn CatalogBackend> = backend.clone();
    Sources::new(backend, &CatalogConfig::default())
}

/// Next value of `stream` that satisfies `pred`. Panics on failure, closure,
/// or after five (possibly virtual) seconds.
pub async fn next_matching<T, P>(stream: &mut ViewStream<T>, pred: P) -> T
where
    T: Clone + std::fmt::Debug,
    P: Fn(&T) -> bool,
{
    tokio::time::timeout(WAIT, async {
        loop {
            match stream.next().await {
                Some(Ok(value)) if pred(&value) => return value,
                Some(Ok(_)) => continue,
                Some(Err(error)) => panic!("stream failed: {error}"),
                None => panic!("stream closed before a matching value"),
            }
        }
    })
    .await
    .expect("timed out waiting for a matching value")
}

/// Next failure of `stream`, skipping values.
pub async fn next_error<T: Clone>(stream: &mut ViewStream<T>) -> FetchError {
    tokio::time::timeout(WAIT, async {
        loop {
            match stream.next().await {
                Some(Ok(_)) => continue,
                Some(Err(error)) => return error,
                None => panic!("stream closed without failing"),
            }
        }
    })
    .await
    .expect("timed out waiting for a failure")
}

/// Wait until `stream` closes, skipping values.
pub async fn until_closed<T: Clone>(stream: &mut ViewStream<T>) {
    tokio::time::timeout(WAIT, async {
        loop {
            match stream.next().await {
                Some(Ok(_)) => continue,
                Some(Err(error)) => panic!("stream failed: {error}"),
                None => return,
            }
        }
    })
    .await
    .expect("timed out waiting for the stream to close")
}

pub fn ids(products: &[Product]) -> Vec<u32> {
    products.iter().map(|p| p.id).collect()
}

pub fn server_error(path: &str) -> FetchError {
    FetchError::status(path, 500, "Internal Server Error")
}

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Create a temporary config file pointing at `base_url`.
pub fn temp_config(base_url: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");

    let content = format!(
        r#"[api]
base_url = "{}"
timeout_seconds = 5
connect_timeout_seconds = 2

[logging]
filter = "warn"
"#,
        base_url
    );

    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

// -- Fixtures -----------------------------------------------------------------

pub fn categories() -> Vec<Category> {
    vec![
        Category { id: 1, name: "Garden".to_string() },
        Category { id: 3, name: "Toolbox".to_string() },
        Category { id: 5, name: "Gaming".to_string() },
    ]
}

fn product(
    id: u32,
    name: &str,
    code: &str,
    price: Option<f64>,
    category_id: u32,
    supplier_ids: Option<Vec<SupplierId>>,
) -> Product {
    Product {
        id,
        product_name: name.to_string(),
        product_code: code.to_string(),
        description: format!("{name} description"),
        price,
        category_id,
        category: None,
        quantity_in_stock: 10,
        supplier_ids,
        search_key: None,
    }
}

pub fn products() -> Vec<Product> {
    vec![
        product(1, "Leaf Rake", "GDN-0011", Some(19.95), 1, Some(vec![1, 2])),
        product(2, "Garden Cart", "GDN-0023", Some(32.99), 1, Some(vec![3, 4])),
        product(5, "Hammer", "TBX-0048", Some(8.9), 3, Some(vec![5, 6])),
        product(8, "Saw", "TBX-0022", Some(11.55), 3, Some(vec![7, 8])),
        product(10, "Video Game Controller", "GMG-0042", Some(35.95), 5, None),
        product(13, "Mystery Box", "MYS-0001", None, 9, Some(vec![])),
    ]
}

pub fn suppliers() -> Vec<Supplier> {
    (1..=8)
        .map(|id| Supplier {
            id,
            supplier_name: format!("Supplier {id}"),
            cost: Some(id as f64 * 2.5),
            min_quantity: Some(id * 6),
        })
        .collect()
}
