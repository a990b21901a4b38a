//! Shopping Cart Domain Models
//!
//! This module contains the cart line and the cart aggregate. Aggregates
//! (`itemCount`, `total`) are recomputed after every mutation and never
//! trusted from storage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::helpers::merge_line;
use crate::{erp::ItemDetails, orders::models::OrderItem};

// =============================================================================
// Cart Domain Models
// =============================================================================

#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("cart line has no item code")]
    MissingItemCode,

    #[error("invalid unit price {price} for {item_code}")]
    InvalidPrice { item_code: String, price: f64 },
}

/// Represents one product line in the shopping cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Product code, unique within a cart
    #[serde(alias = "item_code")]
    pub item_code: String,

    #[serde(default, alias = "item_name")]
    pub item_name: String,

    #[serde(alias = "price")]
    pub unit_price: f64,

    #[serde(default)]
    pub currency: String,

    /// Quantity of this line; zero on input means "one"
    #[serde(default)]
    pub quantity: u32,

    #[serde(default, alias = "image")]
    pub image_url: String,
}

impl CartLine {
    /// Builds a line from an ERP item lookup. `None` when the item has no
    /// code or no price.
    pub fn from_item_details(details: &ItemDetails, quantity: u32) -> Option<Self> {
        let item_code = details.item_code.clone().filter(|c| !c.is_empty())?;
        let price_info = details.price_info.as_ref()?;
        let unit_price = price_info.price?;

        Some(Self {
            item_name: details.item_name.clone().unwrap_or_else(|| item_code.clone()),
            item_code,
            unit_price,
            currency: price_info.currency.clone().unwrap_or_default(),
            quantity,
            image_url: details.image.clone().unwrap_or_default(),
        })
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }

    fn validate(&self) -> Result<(), CartError> {
        if self.item_code.trim().is_empty() {
            return Err(CartError::MissingItemCode);
        }
        if !self.unit_price.is_finite() || self.unit_price < 0.0 {
            return Err(CartError::InvalidPrice {
                item_code: self.item_code.clone(),
                price: self.unit_price,
            });
        }
        Ok(())
    }
}

/// The cart of one browsing session.
///
/// Serializes as `{lines, itemCount, total}`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    item_count: u64,
    total: f64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_code: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_code == item_code)
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Sum of unit price × quantity.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Currency of the first line, which the storefront uses for display.
    pub fn currency(&self) -> Option<&str> {
        self.lines
            .first()
            .map(|l| l.currency.as_str())
            .filter(|c| !c.is_empty())
    }

    /// Adds a line, or increments the quantity of the line with the same code.
    pub fn add_item(&mut self, mut line: CartLine) -> Result<(), CartError> {
        line.validate()?;
        if line.quantity == 0 {
            line.quantity = 1;
        }

        merge_line(&mut self.lines, line);
        self.recalculate();
        Ok(())
    }

    /// Removes the line with that code. Returns whether one was removed.
    pub fn remove_item(&mut self, item_code: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_code != item_code);
        self.recalculate();
        self.lines.len() != before
    }

    /// Sets a line's quantity; zero or less removes the line.
    pub fn update_quantity(&mut self, item_code: &str, quantity: i64) {
        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        if clamped == 0 {
            self.lines.retain(|l| l.item_code != item_code);
        } else if let Some(line) = self.lines.iter_mut().find(|l| l.item_code == item_code) {
            line.quantity = clamped;
        }
        self.recalculate();
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.recalculate();
    }

    /// Lines as order items for the order endpoints.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|l| OrderItem {
                item_code: l.item_code.clone(),
                quantity: l.quantity,
                price: l.unit_price,
            })
            .collect()
    }

    fn recalculate(&mut self) {
        self.item_count = self.lines.iter().map(|l| u64::from(l.quantity)).sum();
        self.total = self
            .lines
            .iter()
            .fold(0.0, |acc, l| acc + l.line_total());
    }
}

/// Persisted cart as read back from storage; aggregates are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct StoredCart {
    #[serde(default, alias = "items")]
    pub lines: Vec<CartLine>,
}
