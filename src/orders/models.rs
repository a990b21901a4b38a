//! Order Domain Models
//!
//! Request and response bodies of the order endpoints, plus the payment
//! payload handed to the hosted checkout.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::erp::RemoteSalesOrder;

// =============================================================================
// Placeholders
// =============================================================================

/// Customer used when the request names none.
pub const GUEST_CUSTOMER: &str = "Guest Customer";
/// Item label used when the first line has no code.
pub const GENERIC_ITEM_LABEL: &str = "Items";
/// Country sent with every payment request.
pub const PAYMENT_COUNTRY: &str = "Sri Lanka";

pub const PLACEHOLDER_FIRST_NAME: &str = "FirstName";
pub const PLACEHOLDER_LAST_NAME: &str = "LastName";
pub const PLACEHOLDER_EMAIL: &str = "test@example.com";
pub const PLACEHOLDER_PHONE: &str = "0777123456";
pub const PLACEHOLDER_ADDRESS: &str = "No. 123, Street";
pub const PLACEHOLDER_CITY: &str = "Colombo";

// =============================================================================
// Requests
// =============================================================================

/// How the customer pays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    /// Hosted online checkout.
    #[serde(rename = "payhere", alias = "ONLINE", alias = "online")]
    Online,

    #[serde(rename = "cod", alias = "CASH_ON_DELIVERY")]
    CashOnDelivery,
}

/// One ordered product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    pub item_code: String,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,
}

/// Shipping form fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub zip_code: String,

    /// Older callers put contact details on the shipping block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `POST /api/place-order` and `POST /api/place-order-cod`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingAddress>,

    #[serde(
        default,
        rename = "paymentMethod",
        skip_serializing_if = "Option::is_none"
    )]
    pub payment_method: Option<PaymentMethod>,
}

/// Query or body of the item lookup.
#[derive(Debug, Default, Deserialize)]
pub struct ItemQuery {
    #[serde(default)]
    pub item_code: Option<String>,
}

/// Query of `GET /api/check-payment`.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentQuery {
    #[serde(default, rename = "orderId")]
    pub order_id: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Fields posted to the hosted checkout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentData {
    pub merchant_id: String,
    pub return_url: String,
    pub cancel_url: String,
    pub notify_url: String,
    pub order_id: String,
    pub items: String,
    pub currency: String,
    pub amount: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub hash: String,
}

/// Response of `POST /api/place-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub status: String,
    pub order_id: String,
    pub payment_url: String,
    pub payment_data: PaymentData,
}

/// Response of `POST /api/place-order-cod`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodOrderResponse {
    pub status: String,
    pub order_id: String,
}

/// Response of the item lookup; `message` is the ERP item JSON as received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub status: String,
    pub message: Value,
}

/// Response of `GET /api/get-order/:orderId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub status: String,
    pub order: RemoteSalesOrder,
}
