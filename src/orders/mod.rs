//! Storefront Order Domain Module
//!
//! This module contains the backend order service, including:
//! - Domain models (order request, payment payload, responses)
//! - Business logic helpers (validation, totals, payment hash)
//! - The ERP-facing order service
//! - REST API handlers

pub mod handlers;
pub mod helpers;
pub mod models;
pub mod service;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use service::OrderService;
