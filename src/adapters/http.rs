use crate::core::{ConfigProvider, ProductCatalog, ProductDetails, ProductId, Stock, StockService};
use crate::utils::error::{CartError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// Client for the store's REST API (`/stock/{id}` and `/products/{id}`).
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: Url,
    client: Client,
}

impl HttpApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|e| CartError::InvalidConfigValueError {
            field: "api.base_url".to_string(),
            value: base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        // Url::join drops the last path segment unless the base ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            client: builder.build()?,
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.api_base_url(),
            config.request_timeout_seconds().map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| CartError::ConfigError {
                message: format!("Cannot build request URL for '{}': {}", path, e),
            })?;

        tracing::debug!("Making API request to: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("API response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl StockService for HttpApiClient {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock> {
        self.get_json(&format!("stock/{}", product_id)).await
    }
}

#[async_trait]
impl ProductCatalog for HttpApiClient {
    async fn get_product(&self, product_id: ProductId) -> Result<ProductDetails> {
        self.get_json(&format!("products/{}", product_id)).await
    }
}
