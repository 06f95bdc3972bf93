use crate::core::{Cart, Storage};
use crate::utils::error::Result;

/// Storage key the cart lives under unless the host picks another namespace.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Persists a whole cart under a single storage key.
#[derive(Debug, Clone)]
pub struct CartStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> CartStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted cart. Missing, unreadable or malformed state yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No persisted cart under '{}', starting empty", self.key);
                return Cart::new();
            }
            Err(e) => {
                tracing::warn!("Failed to read persisted cart '{}': {}", self.key, e);
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                tracing::debug!("Loaded cart with {} products from '{}'", cart.len(), self.key);
                cart
            }
            Err(e) => {
                tracing::warn!("Discarding malformed cart under '{}': {}", self.key, e);
                Cart::new()
            }
        }
    }

    /// Overwrites the stored cart with `cart`.
    pub fn save(&self, cart: &Cart) -> Result<()> {
        let raw = serde_json::to_string(cart)?;
        tracing::debug!("Writing cart ({} bytes) to '{}'", raw.len(), self.key);
        self.storage.set_item(&self.key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryStorage;
    use crate::core::{Product, ProductDetails, ProductId};

    fn product(id: u64, amount: u32) -> Product {
        Product::new(
            ProductDetails::new(ProductId(id))
                .with_field("title", format!("Running shoe {}", id))
                .with_field("price", 179.9)
                .with_field("image", format!("https://cdn.example.com/shoes/{}.jpg", id)),
            amount,
        )
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = CartStore::new(MemoryStorage::new(), DEFAULT_CART_KEY);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_malformed_value_is_empty() {
        let storage = MemoryStorage::new();
        storage.set_item(DEFAULT_CART_KEY, "{not json").unwrap();
        let store = CartStore::new(storage.clone(), DEFAULT_CART_KEY);
        assert!(store.load().is_empty());

        storage.set_item(DEFAULT_CART_KEY, r#"{"id": 1}"#).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_order_and_amounts() {
        let storage = MemoryStorage::new();
        let store = CartStore::new(storage.clone(), DEFAULT_CART_KEY);
        let cart = Cart::from_items(vec![product(3, 2), product(1, 1), product(2, 7)]);

        store.save(&cart).unwrap();
        let reloaded = CartStore::new(storage, DEFAULT_CART_KEY).load();

        assert_eq!(reloaded, cart);
        let ids: Vec<u64> = reloaded.iter().map(|p| p.id().0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_save_overwrites_previous_value() {
        let storage = MemoryStorage::new();
        let store = CartStore::new(storage.clone(), "shop:cart");

        store
            .save(&Cart::from_items(vec![product(1, 1), product(2, 1)]))
            .unwrap();
        store.save(&Cart::from_items(vec![product(2, 3)])).unwrap();

        let raw = storage.get_item("shop:cart").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["amount"], 3);
        assert!(storage.get_item(DEFAULT_CART_KEY).unwrap().is_none());
    }
}
