//! Checkout flow
//!
//! Validates the form, turns the cart into an order request and submits it
//! through the backend. Cash orders clear the cart on success; online orders
//! hand the payment payload to a `PaymentWidget` and leave the cart alone
//! until the customer returns from the gateway. Any failure leaves the cart
//! exactly as it was.

use std::fmt;

use tracing::{info, instrument, warn};
use url::form_urlencoded;

use super::{client::StorefrontClient, form::CheckoutForm, CheckoutError};
use crate::{
    cart::{storage::CartStorage, Cart, CartStore},
    erp::RemoteSalesOrder,
    orders::models::{OrderRequest, PaymentMethod},
    payments::{PaymentEvents, PaymentWidget},
};

/// Page shown after a cash-on-delivery order.
pub const COD_CONFIRMATION_PATH: &str = "/cod-order-confirmed";

/// Result of a successful submission.
pub enum CheckoutOutcome {
    /// Order placed; the caller should show the confirmation page.
    Confirmed {
        order_id: String,
        confirmation_path: String,
    },
    /// Order created and handed to the payment widget.
    PaymentStarted {
        order_id: String,
        events: PaymentEvents,
    },
}

impl CheckoutOutcome {
    pub fn order_id(&self) -> &str {
        match self {
            Self::Confirmed { order_id, .. } | Self::PaymentStarted { order_id, .. } => order_id,
        }
    }
}

impl fmt::Debug for CheckoutOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed {
                order_id,
                confirmation_path,
            } => f
                .debug_struct("Confirmed")
                .field("order_id", order_id)
                .field("confirmation_path", confirmation_path)
                .finish(),
            Self::PaymentStarted { order_id, .. } => f
                .debug_struct("PaymentStarted")
                .field("order_id", order_id)
                .finish_non_exhaustive(),
        }
    }
}

pub struct Checkout<W: PaymentWidget> {
    client: StorefrontClient,
    widget: W,
    last_order_id: Option<String>,
}

impl<W: PaymentWidget> Checkout<W> {
    pub fn new(client: StorefrontClient, widget: W) -> Self {
        Self {
            client,
            widget,
            last_order_id: None,
        }
    }

    pub fn client(&self) -> &StorefrontClient {
        &self.client
    }

    /// Id of the most recent order this checkout placed.
    pub fn last_order_id(&self) -> Option<&str> {
        self.last_order_id.as_deref()
    }

    /// Submits the cart.
    ///
    /// Takes `&mut self` so a checkout has at most one submission in flight;
    /// the backend does not deduplicate orders.
    #[instrument(skip_all, fields(method = ?method, lines = cart.cart().lines().len()))]
    pub async fn submit<S: CartStorage>(
        &mut self,
        cart: &mut CartStore<S>,
        form: &CheckoutForm,
        method: PaymentMethod,
        customer_name: Option<&str>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        form.validate().map_err(CheckoutError::Validation)?;
        if cart.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let request = build_order_request(cart.cart(), form, method, customer_name);

        let outcome = match method {
            PaymentMethod::CashOnDelivery => {
                let placed = self.client.place_order_cod(&request).await?;
                info!(order_id = %placed.order_id, summary = %cart.summary(), "cash order placed");
                cart.clear();

                CheckoutOutcome::Confirmed {
                    confirmation_path: confirmation_path(&placed.order_id),
                    order_id: placed.order_id,
                }
            }
            PaymentMethod::Online => {
                let placed = self.client.place_order(&request).await?;
                info!(order_id = %placed.order_id, amount = %placed.payment_data.amount, "online order created");

                let events = self
                    .widget
                    .initiate(&placed.payment_url, &placed.payment_data)
                    .map_err(|message| {
                        warn!(order_id = %placed.order_id, %message, "payment widget failed to start");
                        CheckoutError::Payment(message)
                    })?;

                CheckoutOutcome::PaymentStarted {
                    order_id: placed.order_id,
                    events,
                }
            }
        };

        self.last_order_id = Some(outcome.order_id().to_string());
        Ok(outcome)
    }

    /// Fetches the order for the confirmation page.
    pub async fn confirmation(&self, order_id: &str) -> Result<RemoteSalesOrder, CheckoutError> {
        self.client.get_order(order_id).await
    }
}

/// Confirmation page link carrying the order id as an encoded query pair.
pub fn confirmation_path(order_id: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("order_id", order_id)
        .finish();
    format!("{COD_CONFIRMATION_PATH}?{query}")
}

/// Builds the order request from the live cart and the form.
pub fn build_order_request(
    cart: &Cart,
    form: &CheckoutForm,
    method: PaymentMethod,
    customer_name: Option<&str>,
) -> OrderRequest {
    let contact = form.contact();
    OrderRequest {
        items: cart.to_order_items(),
        customer_name: customer_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string),
        email: Some(contact.email.clone()),
        phone: Some(contact.phone.clone()),
        contact: Some(contact),
        shipping: Some(form.shipping.clone()),
        payment_method: Some(method),
    }
}
