//! ERP document models
//!
//! Typed views of the JSON exchanged with the ERP system. Sales Order reads
//! keep unknown fields in `extra` so relayed documents lose nothing; item
//! lookups are relayed as raw JSON.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::orders::models::OrderItem;

// =============================================================================
// Constants
// =============================================================================

/// Document type of an ERP Sales Order.
pub const SALES_ORDER_DOCTYPE: &str = "Sales Order";
/// Document type of a Sales Order line.
pub const SALES_ORDER_ITEM_DOCTYPE: &str = "Sales Order Item";
/// Naming series that lets the ERP assign `SO-ICK-####` identifiers.
pub const NAMING_SERIES: &str = "SO-ICK-.####";
/// Currency of every order placed by this storefront.
pub const ORDER_CURRENCY: &str = "LKR";
/// `docstatus` of a submitted (finalized) ERP document.
pub const DOCSTATUS_SUBMITTED: u8 = 1;
/// Days between order placement and the promised delivery date.
pub const DELIVERY_LEAD_DAYS: u64 = 7;

// =============================================================================
// Item lookup
// =============================================================================

/// Price block of an item lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceInfo {
    /// `None` when the ERP has no price for the item.
    pub price: Option<f64>,
    pub currency: Option<String>,
}

/// Typed view over the item lookup result.
///
/// The backend relays the ERP's JSON untouched; this view is built on the
/// client side and tolerates missing or oddly typed fields (numeric item
/// codes, prices sent as strings, `price: null`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDetails {
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub price_info: Option<PriceInfo>,
    pub image: Option<String>,
}

impl ItemDetails {
    pub fn from_value(value: &Value) -> Self {
        let price_info = value.get("price_info").filter(|p| p.is_object()).map(|p| PriceInfo {
            price: p.get("price").and_then(lenient_number),
            currency: p.get("currency").and_then(lenient_string),
        });

        Self {
            item_code: value.get("item_code").and_then(lenient_string),
            item_name: value.get("item_name").and_then(lenient_string),
            price_info,
            image: value.get("image").and_then(lenient_string),
        }
    }
}

fn lenient_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Sales Order
// =============================================================================

/// A Sales Order line as sent to the ERP.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesOrderItem {
    pub item_code: String,
    pub qty: u32,
    pub rate: f64,
    pub doctype: &'static str,
}

impl From<&OrderItem> for SalesOrderItem {
    fn from(item: &OrderItem) -> Self {
        Self {
            item_code: item.item_code.clone(),
            qty: item.quantity,
            rate: item.price,
            doctype: SALES_ORDER_ITEM_DOCTYPE,
        }
    }
}

/// The Sales Order document submitted on checkout.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesOrderDoc {
    pub doctype: &'static str,
    pub naming_series: &'static str,
    pub customer: String,
    pub transaction_date: NaiveDate,
    pub delivery_date: NaiveDate,
    pub items: Vec<SalesOrderItem>,
    pub currency: &'static str,
    pub docstatus: u8,

    /// Cash-on-delivery marker, only present on COD orders.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cod: Option<u8>,
}

impl SalesOrderDoc {
    /// Builds a submitted Sales Order dated `today`, delivering a week later.
    pub fn new(customer: impl Into<String>, items: &[OrderItem], today: NaiveDate) -> Self {
        Self {
            doctype: SALES_ORDER_DOCTYPE,
            naming_series: NAMING_SERIES,
            customer: customer.into(),
            transaction_date: today,
            delivery_date: today
                .checked_add_days(Days::new(DELIVERY_LEAD_DAYS))
                .unwrap_or(today),
            items: items.iter().map(SalesOrderItem::from).collect(),
            currency: ORDER_CURRENCY,
            docstatus: DOCSTATUS_SUBMITTED,
            cod: None,
        }
    }

    /// Marks the order as cash on delivery.
    pub fn cash_on_delivery(mut self) -> Self {
        self.cod = Some(1);
        self
    }
}

/// Envelope the ERP resource API expects around a new document.
#[derive(Debug, Serialize)]
pub struct CreateEnvelope<'a, T> {
    pub data: &'a T,
}

/// Reference to a created document, `{data: {name}}`.
#[derive(Debug, Deserialize)]
pub struct CreatedDoc {
    pub data: DocName,
}

#[derive(Debug, Deserialize)]
pub struct DocName {
    pub name: String,
}

/// A Sales Order line as read back from the ERP.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteSalesOrderItem {
    pub item_code: String,

    #[serde(default)]
    pub item_name: Option<String>,

    pub qty: f64,
    pub rate: f64,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// A Sales Order as stored by the ERP. Read-only from this service's side.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoteSalesOrder {
    /// ERP-assigned identifier, e.g. `SO-ICK-0007`.
    pub name: String,

    #[serde(default)]
    pub customer: Option<String>,

    #[serde(default)]
    pub transaction_date: Option<String>,

    #[serde(default)]
    pub delivery_date: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub docstatus: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cod: Option<u8>,

    #[serde(default)]
    pub grand_total: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub items: Vec<RemoteSalesOrderItem>,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl RemoteSalesOrder {
    pub fn is_cash_on_delivery(&self) -> bool {
        self.cod == Some(1)
    }

    pub fn is_submitted(&self) -> bool {
        self.docstatus == Some(DOCSTATUS_SUBMITTED)
    }
}

/// Wrapper used by the ERP resource read endpoint, `{data: {...}}`.
#[derive(Debug, Deserialize)]
pub struct ReadEnvelope<T> {
    pub data: T,
}

/// Error body shape used by the ERP (`{message: "..."}`).
#[derive(Debug, Deserialize)]
pub struct ErpMessage {
    #[serde(default)]
    pub message: Option<Value>,

    #[serde(default)]
    pub exception: Option<String>,
}

impl ErpMessage {
    /// Best human readable description in the error body, if any.
    pub fn text(&self) -> Option<String> {
        match &self.message {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => self.exception.clone().filter(|s| !s.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<OrderItem> {
        vec![OrderItem {
            item_code: "G1".into(),
            quantity: 2,
            price: 100.0,
        }]
    }

    #[test]
    fn sales_order_document_shape() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let doc = SalesOrderDoc::new("Guest Customer", &items(), today);
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["doctype"], "Sales Order");
        assert_eq!(value["naming_series"], "SO-ICK-.####");
        assert_eq!(value["transaction_date"], "2026-10-19");
        assert_eq!(value["delivery_date"], "2026-10-26");
        assert_eq!(value["currency"], "LKR");
        assert_eq!(value["docstatus"], 1);
        assert_eq!(
            value["items"][0],
            json!({"item_code": "G1", "qty": 2, "rate": 100.0, "doctype": "Sales Order Item"})
        );
        assert!(value.get("cod").is_none());
    }

    #[test]
    fn cod_flag_is_serialized_only_for_cod_orders() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 28).unwrap();
        let doc = SalesOrderDoc::new("Guest Customer", &items(), today).cash_on_delivery();
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["cod"], 1);
        assert_eq!(value["delivery_date"], "2027-01-04");
    }

    #[test]
    fn remote_order_keeps_unknown_fields() {
        let order: RemoteSalesOrder = serde_json::from_value(json!({
            "name": "SO-ICK-0007",
            "docstatus": 1,
            "cod": 1,
            "items": [{"item_code": "G1", "qty": 2.0, "rate": 100.0, "uom": "Nos"}],
            "territory": "Sri Lanka"
        }))
        .unwrap();

        assert!(order.is_submitted());
        assert!(order.is_cash_on_delivery());
        assert_eq!(order.items[0].extra["uom"], "Nos");

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["territory"], "Sri Lanka");
    }

    #[test]
    fn item_view_tolerates_loose_shapes() {
        let item = ItemDetails::from_value(&json!({
            "item_code": 1234,
            "item_name": "Ghee",
            "price_info": { "price": "250.50", "currency": "LKR" },
            "stock_qty": 4
        }));
        assert_eq!(item.item_code.as_deref(), Some("1234"));
        assert_eq!(item.price_info.unwrap().price, Some(250.5));

        let no_price = ItemDetails::from_value(&json!({
            "item_code": "G2",
            "price_info": { "price": null, "currency": "LKR" }
        }));
        let price_info = no_price.price_info.unwrap();
        assert_eq!(price_info.price, None);
        assert_eq!(price_info.currency.as_deref(), Some("LKR"));

        let empty = ItemDetails::from_value(&json!({ "item_code": "G3", "price_info": {} }));
        assert_eq!(empty.price_info.unwrap().price, None);

        assert_eq!(ItemDetails::from_value(&json!("not an item")), ItemDetails::default());
    }

    #[test]
    fn error_message_prefers_message_then_exception() {
        let msg: ErpMessage = serde_json::from_value(json!({"message": "Invalid customer"})).unwrap();
        assert_eq!(msg.text().as_deref(), Some("Invalid customer"));

        let msg: ErpMessage =
            serde_json::from_value(json!({"exception": "ValidationError"})).unwrap();
        assert_eq!(msg.text().as_deref(), Some("ValidationError"));
    }
}
