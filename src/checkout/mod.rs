//! Checkout Module
//!
//! This module contains the client side of ordering:
//! - `StorefrontClient`: typed HTTP client for the backend endpoints
//! - `CheckoutForm`: contact/shipping fields and their validation
//! - `Checkout`: submits the cart and branches on payment method

pub mod client;
pub mod form;
pub mod orchestrator;

use thiserror::Error;

pub use client::StorefrontClient;
pub use form::{CheckoutForm, FieldError};
pub use orchestrator::{Checkout, CheckoutOutcome, COD_CONFIRMATION_PATH};

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("checkout form is incomplete: {}", field_list(.0))]
    Validation(Vec<FieldError>),

    #[error("cart is empty")]
    EmptyCart,

    #[error("could not reach the store: {0}")]
    Http(#[from] reqwest::Error),

    /// Error message returned by the backend.
    #[error("{0}")]
    Api(String),

    #[error("payment could not be started: {0}")]
    Payment(String),
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field)
        .collect::<Vec<_>>()
        .join(", ")
}
