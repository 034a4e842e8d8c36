use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::backend::CatalogBackend;
use crate::config::ApiConfig;
use crate::error::FetchError;
use crate::model::{Category, Product, Supplier, SupplierId};

/// Errors building the HTTP client.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// [`CatalogBackend`] over a JSON REST API.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    products_path: String,
    categories_path: String,
    suppliers_path: String,
}

impl HttpBackend {
    pub fn new(config: &ApiConfig) -> Result<Self, BackendError> {
        Url::parse(&config.base_url).map_err(|e| BackendError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds as u64))
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds as u64))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            products_path: config.products_path.clone(),
            categories_path: config.categories_path.clone(),
            suppliers_path: config.suppliers_path.clone(),
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::transport(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::status(
                url,
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(&url, e.to_string()))?;

        serde_json::from_slice(&body)
            .map_err(|e| FetchError::decode(url, status.as_u16(), e.to_string()))
    }
}

#[async_trait]
impl CatalogBackend for HttpBackend {
    async fn products(&self) -> Result<Vec<Product>, FetchError> {
        self.get_json(self.url_for(&self.products_path)).await
    }

    async fn categories(&self) -> Result<Vec<Category>, FetchError> {
        self.get_json(self.url_for(&self.categories_path)).await
    }

    async fn suppliers(&self) -> Result<Vec<Supplier>, FetchError> {
        self.get_json(self.url_for(&self.suppliers_path)).await
    }

    async fn supplier(&self, id: SupplierId) -> Result<Supplier, FetchError> {
        let path = format!("{}/{}", self.suppliers_path.trim_end_matches('/'), id);
        self.get_json(self.url_for(&path)).await
    }
}
