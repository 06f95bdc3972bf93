pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::HttpApiClient;
pub use crate::adapters::notify::{RecordingNotifier, TracingNotifier};
pub use crate::adapters::storage::{LocalStorage, MemoryStorage};
pub use crate::config::CartConfig;
pub use crate::core::cart::{CartManager, Outcome};
pub use crate::core::store::{CartStore, DEFAULT_CART_KEY};
pub use crate::domain::model::{Cart, Product, ProductDetails, ProductId, Stock};
pub use crate::utils::error::{CartError, CartOperation, Result};

#[cfg(feature = "cli")]
pub use crate::config::cli::{CartCommand, CliArgs};
