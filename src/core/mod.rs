pub mod cart;
pub mod store;

pub use crate::domain::model::{Cart, Product, ProductDetails, ProductId, Stock};
pub use crate::domain::ports::{
    ConfigProvider, Notification, Notifier, ProductCatalog, StockService, Storage,
};
pub use crate::utils::error::Result;
