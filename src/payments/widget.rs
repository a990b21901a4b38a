//! Hosted payment widget capability
//!
//! The storefront does not talk to the gateway's widget directly; it asks a
//! `PaymentWidget` to start a payment and receives one stream of outcomes.

use futures_util::stream::BoxStream;
use serde::{Deserialize, Serialize};

use crate::orders::models::PaymentData;

/// Outcome reported by the payment widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PaymentEvent {
    /// The customer completed the gateway form.
    Submitted { order_id: String },
    /// The customer closed the widget without paying.
    Dismissed { order_id: String },
    Errored { message: String },
}

impl PaymentEvent {
    /// `true` when the customer may retry from the checkout page.
    pub fn allows_retry(&self) -> bool {
        !matches!(self, Self::Submitted { .. })
    }
}

/// Stream of widget outcomes for one payment.
pub type PaymentEvents = BoxStream<'static, PaymentEvent>;

/// Starts a hosted payment for a prepared payload.
pub trait PaymentWidget: Send + Sync {
    fn initiate(&self, checkout_url: &str, payment: &PaymentData) -> Result<PaymentEvents, String>;
}
