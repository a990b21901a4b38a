//! Application State
//!
//! Everything request handlers share, created once at process start.

use std::sync::Arc;

use crate::{
    config::Config,
    erp::ErpError,
    orders::OrderService,
    payments::PaymentStatusStore,
};

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state: the order service and the payment status store.
#[derive(Debug)]
pub struct AppState {
    pub orders: OrderService,

    /// Per-order payment status, kept until explicitly cleared.
    pub payments: PaymentStatusStore,
}

impl AppState {
    pub fn new(orders: OrderService) -> Self {
        Self {
            orders,
            payments: PaymentStatusStore::new(),
        }
    }

    /// Builds the state (and its ERP connection pool) from configuration.
    pub fn from_config(config: Arc<Config>) -> Result<Self, ErpError> {
        Ok(Self::new(OrderService::from_config(config)?))
    }
}
