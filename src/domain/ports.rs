use crate::domain::model::{ProductDetails, ProductId, Stock};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Key-value client storage. Every write overwrites the whole value for the key.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn request_timeout_seconds(&self) -> Option<u64>;
}

#[async_trait]
pub trait StockService: Send + Sync {
    async fn get_stock(&self, product_id: ProductId) -> Result<Stock>;
}

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn get_product(&self, product_id: ProductId) -> Result<ProductDetails>;
}

/// A fire-and-forget, user-visible message about an operation outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
