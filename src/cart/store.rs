//! Cart store
//!
//! Owns the session's `Cart` and writes a full snapshot to storage after
//! every mutation. On open, stored lines are replayed through `add_item`, so
//! duplicates merge and totals are recomputed from scratch.

use tracing::{debug, warn};

use super::{
    helpers::format_line_summary,
    models::{Cart, CartError, CartLine, StoredCart},
    storage::CartStorage,
};

/// Fixed key under which the cart snapshot is stored.
pub const CART_STORAGE_KEY: &str = "cart";

#[derive(Debug)]
pub struct CartStore<S: CartStorage> {
    cart: Cart,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Opens the store, rehydrating any saved cart.
    ///
    /// Unreadable or unparsable snapshots yield an empty cart.
    pub fn open(storage: S) -> Self {
        let mut cart = Cart::new();

        let stored = match storage.load(CART_STORAGE_KEY) {
            Ok(Some(raw)) => serde_json::from_str::<StoredCart>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "saved cart is not valid JSON, starting empty");
                StoredCart::default()
            }),
            Ok(None) => StoredCart::default(),
            Err(e) => {
                warn!(error = %e, "could not read saved cart, starting empty");
                StoredCart::default()
            }
        };

        for line in stored.lines {
            if let Err(e) = cart.add_item(line) {
                warn!(error = %e, "dropping invalid saved cart line");
            }
        }
        debug!(lines = cart.lines().len(), total = cart.total(), "cart rehydrated");

        Self { cart, storage }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add_item(&mut self, line: CartLine) -> Result<(), CartError> {
        self.cart.add_item(line)?;
        self.persist();
        Ok(())
    }

    pub fn remove_item(&mut self, item_code: &str) {
        self.cart.remove_item(item_code);
        self.persist();
    }

    pub fn update_quantity(&mut self, item_code: &str, quantity: i64) {
        self.cart.update_quantity(item_code, quantity);
        self.persist();
    }

    pub fn clear(&mut self) {
        self.cart.clear();
        self.persist();
    }

    /// One-line description of the cart contents for logs.
    pub fn summary(&self) -> String {
        format_line_summary(self.cart.lines())
    }

    /// Writes the snapshot. Failures are logged; the in-memory cart stays
    /// authoritative for this session.
    fn persist(&self) {
        let result = serde_json::to_string(&self.cart)
            .map_err(|e| e.to_string())
            .and_then(|json| {
                self.storage
                    .save(CART_STORAGE_KEY, &json)
                    .map_err(|e| e.to_string())
            });

        if let Err(error) = result {
            warn!(%error, "failed to persist cart");
        }
    }
}
