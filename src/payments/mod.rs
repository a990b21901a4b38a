//! Payments Module
//!
//! This module contains the payment side of checkout:
//! - Per-order payment status store (shared through `AppState`)
//! - The hosted payment widget capability used by the checkout flow

pub mod status;
pub mod widget;

pub use status::{PaymentRecord, PaymentStatus, PaymentStatusStore};
pub use widget::{PaymentEvent, PaymentEvents, PaymentWidget};
