use crate::domain::model::ProductId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Requested quantity {requested} of product {product_id} exceeds stock ({available})")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Product {product_id} is not in the cart")]
    NotFound { product_id: ProductId },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected response from store API: {message}")]
    UnexpectedResponse { message: String },

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Stock,
    NotFound,
    Transport,
    Storage,
    Config,
}

/// The mutating cart operation an error surfaced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    Add,
    Remove,
    UpdateAmount,
}

pub const OUT_OF_STOCK_MESSAGE: &str = "Requested quantity is out of stock";

impl CartOperation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            CartOperation::Add => "Failed to add product",
            CartOperation::Remove => "Failed to remove product",
            CartOperation::UpdateAmount => "Failed to update product amount",
        }
    }
}

impl std::fmt::Display for CartOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CartOperation::Add => "add",
            CartOperation::Remove => "remove",
            CartOperation::UpdateAmount => "update_amount",
        };
        f.write_str(name)
    }
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::InsufficientStock { .. } => ErrorCategory::Stock,
            CartError::NotFound { .. } => ErrorCategory::NotFound,
            CartError::ApiError(_)
            | CartError::SerializationError(_)
            | CartError::UnexpectedResponse { .. } => ErrorCategory::Transport,
            CartError::IoError(_) | CartError::StorageError { .. } => ErrorCategory::Storage,
            CartError::ConfigError { .. }
            | CartError::InvalidConfigValueError { .. }
            | CartError::ConfigValidationError { .. } => ErrorCategory::Config,
        }
    }

    /// One-line text shown to the shopper when `operation` fails with this error.
    ///
    /// Only stock violations get a specific message; everything else collapses into the
    /// operation's generic failure text.
    pub fn user_friendly_message(&self, operation: CartOperation) -> &'static str {
        match self.category() {
            ErrorCategory::Stock => OUT_OF_STOCK_MESSAGE,
            _ => operation.failure_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_errors_get_specific_message() {
        let err = CartError::InsufficientStock {
            product_id: ProductId(3),
            requested: 4,
            available: 3,
        };
        assert_eq!(err.category(), ErrorCategory::Stock);
        assert_eq!(
            err.user_friendly_message(CartOperation::Add),
            OUT_OF_STOCK_MESSAGE
        );
        assert_eq!(
            err.user_friendly_message(CartOperation::UpdateAmount),
            OUT_OF_STOCK_MESSAGE
        );
    }

    #[test]
    fn test_other_errors_use_operation_message() {
        let not_found = CartError::NotFound {
            product_id: ProductId(9),
        };
        assert_eq!(not_found.category(), ErrorCategory::NotFound);
        assert_eq!(
            not_found.user_friendly_message(CartOperation::Remove),
            "Failed to remove product"
        );

        let storage = CartError::StorageError {
            message: "disk full".to_string(),
        };
        assert_eq!(storage.category(), ErrorCategory::Storage);
        assert_eq!(
            storage.user_friendly_message(CartOperation::Add),
            "Failed to add product"
        );

        let malformed = CartError::SerializationError(
            serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        );
        assert_eq!(malformed.category(), ErrorCategory::Transport);
        assert_eq!(
            malformed.user_friendly_message(CartOperation::UpdateAmount),
            "Failed to update product amount"
        );
    }
}
