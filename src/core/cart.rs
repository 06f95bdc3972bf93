use crate::core::store::{CartStore, DEFAULT_CART_KEY};
use crate::core::{
    Cart, Notification, Notifier, Product, ProductCatalog, ProductId, Stock, StockService,
    Storage,
};
use crate::utils::error::{CartError, CartOperation, Result};

/// What a successful cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The cart changed and was written through to storage.
    Committed,
    /// Nothing to do; not a failure and not reported.
    Ignored,
}

/// Owns the cart for one session and keeps it in lockstep with storage.
///
/// Mutations go through `add`, `remove` and `update_amount`. They never return errors:
/// failures are reported through the notifier and leave both the in-memory and the
/// persisted cart untouched. The `try_*` variants expose the underlying result.
pub struct CartManager<S: Storage, A, N> {
    cart: Cart,
    store: CartStore<S>,
    api: A,
    notifier: N,
}

impl<S, A, N> CartManager<S, A, N>
where
    S: Storage,
    A: StockService + ProductCatalog,
    N: Notifier,
{
    pub fn new(storage: S, api: A, notifier: N) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY, api, notifier)
    }

    pub fn with_key(storage: S, key: impl Into<String>, api: A, notifier: N) -> Self {
        let store = CartStore::new(storage, key);
        let cart = store.load();
        Self {
            cart,
            store,
            api,
            notifier,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn add(&mut self, product_id: ProductId) {
        let result = self.try_add(product_id).await;
        self.report(CartOperation::Add, product_id, result);
    }

    pub fn remove(&mut self, product_id: ProductId) {
        let result = self.try_remove(product_id);
        self.report(CartOperation::Remove, product_id, result);
    }

    pub async fn update_amount(&mut self, product_id: ProductId, amount: i64) {
        let result = self.try_update_amount(product_id, amount).await;
        self.report(CartOperation::UpdateAmount, product_id, result);
    }

    /// Adds one unit of `product_id`, fetching its details when it is new to the cart.
    pub async fn try_add(&mut self, product_id: ProductId) -> Result<Outcome> {
        let stock = self.fetch_stock(product_id).await?;
        let mut next = self.cart.clone();

        match next.get_mut(product_id) {
            Some(existing) => {
                let requested = existing.amount.saturating_add(1);
                ensure_in_stock(product_id, requested, &stock)?;
                existing.amount = requested;
            }
            None => {
                ensure_in_stock(product_id, 1, &stock)?;
                tracing::debug!("Fetching details for product {}", product_id);
                let details = self.api.get_product(product_id).await?;
                if details.id != product_id {
                    return Err(CartError::UnexpectedResponse {
                        message: format!(
                            "requested product {} but catalog returned {}",
                            product_id, details.id
                        ),
                    });
                }
                next.push(Product::new(details, 1));
            }
        }

        self.commit(next)?;
        Ok(Outcome::Committed)
    }

    pub fn try_remove(&mut self, product_id: ProductId) -> Result<Outcome> {
        let next = self
            .cart
            .without(product_id)
            .ok_or(CartError::NotFound { product_id })?;

        self.commit(next)?;
        Ok(Outcome::Committed)
    }

    /// Sets the amount of a product already in the cart. Non-positive amounts and
    /// products not in the cart are ignored.
    pub async fn try_update_amount(&mut self, product_id: ProductId, amount: i64) -> Result<Outcome> {
        if amount <= 0 {
            tracing::debug!("Ignoring non-positive amount {} for product {}", amount, product_id);
            return Ok(Outcome::Ignored);
        }

        let stock = self.fetch_stock(product_id).await?;
        let requested = u32::try_from(amount).map_err(|_| CartError::InsufficientStock {
            product_id,
            requested: u32::MAX,
            available: stock.amount,
        })?;
        ensure_in_stock(product_id, requested, &stock)?;

        let mut next = self.cart.clone();
        match next.get_mut(product_id) {
            Some(existing) => existing.amount = requested,
            None => {
                tracing::debug!("Product {} is not in the cart, nothing to update", product_id);
                return Ok(Outcome::Ignored);
            }
        }

        self.commit(next)?;
        Ok(Outcome::Committed)
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock> {
        tracing::debug!("Checking stock for product {}", product_id);
        let stock = self.api.get_stock(product_id).await?;
        tracing::debug!("Product {} has {} units in stock", product_id, stock.amount);
        Ok(stock)
    }

    // Storage is written first so a failed write leaves the in-memory cart as it was.
    fn commit(&mut self, next: Cart) -> Result<()> {
        self.store.save(&next)?;
        self.cart = next;
        Ok(())
    }

    fn report(&self, operation: CartOperation, product_id: ProductId, result: Result<Outcome>) {
        match result {
            Ok(Outcome::Committed) => tracing::info!(
                "🛒 {} product {}: cart now holds {} products ({} items)",
                operation,
                product_id,
                self.cart.len(),
                self.cart.total_items()
            ),
            Ok(Outcome::Ignored) => {
                tracing::debug!("{} product {}: nothing to do", operation, product_id)
            }
            Err(e) => {
                tracing::warn!(
                    "❌ {} product {} failed: {} (Category: {:?})",
                    operation,
                    product_id,
                    e,
                    e.category()
                );
                self.notifier
                    .notify(&Notification::new(e.user_friendly_message(operation)));
            }
        }
    }
}

fn ensure_in_stock(product_id: ProductId, requested: u32, stock: &Stock) -> Result<()> {
    if stock.covers(requested) {
        Ok(())
    } else {
        Err(CartError::InsufficientStock {
            product_id,
            requested,
            available: stock.amount,
        })
    }
}
