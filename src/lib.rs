//! Storefront Library
//!
//! This library provides the storefront backend (item lookup and order
//! placement proxied to the ERP, payment payload signing) and the client-side
//! cart and checkout flow that talk to it.

// Domain modules
pub mod cart;
pub mod checkout;
pub mod erp;
pub mod orders;
pub mod payments;

// Infrastructure
pub mod config;
pub mod error;
pub mod format;
pub mod router;
pub mod state;
