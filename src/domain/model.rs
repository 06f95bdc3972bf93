use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Catalog metadata for a product. Only `id` is interpreted; every other field the
/// catalog sends is kept as-is and persisted with the cart entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetails {
    pub id: ProductId,
    #[serde(flatten)]
    pub display: Map<String, Value>,
}

impl ProductDetails {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            display: Map::new(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.display.insert(name.into(), value.into());
        self
    }
}

/// A cart entry: catalog metadata plus the quantity currently selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub display: Map<String, Value>,
    pub amount: u32,
}

impl Product {
    pub fn new(details: ProductDetails, amount: u32) -> Self {
        let mut display = details.display;
        // The cart owns `amount`; a catalog field of that name must not shadow it.
        display.remove("amount");
        Self {
            id: details.id,
            display,
            amount,
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.display.get("title").and_then(Value::as_str)
    }
}

/// Available quantity for a product as reported by the stock service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub amount: u32,
}

impl Stock {
    pub fn covers(&self, requested: u32) -> bool {
        self.amount >= requested
    }
}

/// Ordered cart contents, unique by product id, every amount at least 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from raw entries, dropping zero-amount entries and any
    /// repeated id after its first occurrence.
    pub fn from_items(items: Vec<Product>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.amount == 0 || cart.contains(item.id()) {
                continue;
            }
            cart.items.push(item);
        }
        cart
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.amount)).sum()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    pub fn get(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Product] {
        &self.items
    }

    pub(crate) fn get_mut(&mut self, product_id: ProductId) -> Option<&mut Product> {
        self.items.iter_mut().find(|item| item.id() == product_id)
    }

    /// Appends a new entry. Callers check `contains` first.
    pub(crate) fn push(&mut self, product: Product) {
        debug_assert!(!self.contains(product.id()));
        debug_assert!(product.amount >= 1);
        self.items.push(product);
    }

    /// Returns a copy of the cart without `product_id`, or `None` if it is absent.
    pub(crate) fn without(&self, product_id: ProductId) -> Option<Cart> {
        if !self.contains(product_id) {
            return None;
        }
        Some(Cart {
            items: self
                .items
                .iter()
                .filter(|item| item.id() != product_id)
                .cloned()
                .collect(),
        })
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<Product>::deserialize(deserializer)?;
        Ok(Cart::from_items(items))
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
