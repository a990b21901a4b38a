//! Order Business Logic Helpers
//!
//! Pure functions used by the order service: request validation, totals,
//! the payment integrity hash and payment payload assembly.

use md5::{Digest, Md5};

use super::models::*;
use crate::{
    config::{MerchantCredentials, PaymentUrls},
    erp::models::ORDER_CURRENCY,
    error::ApiError,
    format::format_amount,
};

/// Checks the invariants of an incoming order before any upstream call.
pub fn validate_order(request: &OrderRequest) -> Result<(), ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::BadRequest(
            "No items provided in order data".to_string(),
        ));
    }

    for (index, item) in request.items.iter().enumerate() {
        if item.item_code.trim().is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Item {index} is missing item_code"
            )));
        }
        if item.quantity == 0 {
            return Err(ApiError::BadRequest(format!(
                "Item {} must have a positive quantity",
                item.item_code
            )));
        }
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(ApiError::BadRequest(format!(
                "Item {} must have a non-negative price",
                item.item_code
            )));
        }
    }

    Ok(())
}

/// Sum of quantity × price over all lines.
pub fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().fold(0.0, |acc, item| acc + item.line_total())
}

/// Computes the payment gateway integrity hash.
///
/// `MD5(merchant_id + order_id + amount + currency + secret)`, hex encoded
/// and upper-cased. Field order and the two-decimal amount must match what
/// the gateway recomputes.
pub fn payment_hash(
    merchant_id: &str,
    order_id: &str,
    amount_formatted: &str,
    currency: &str,
    merchant_secret: &str,
) -> String {
    let mut hasher = Md5::new();
    hasher.update(merchant_id.as_bytes());
    hasher.update(order_id.as_bytes());
    hasher.update(amount_formatted.as_bytes());
    hasher.update(currency.as_bytes());
    hasher.update(merchant_secret.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Customer name for the Sales Order, falling back to the guest placeholder.
pub fn customer_name(request: &OrderRequest) -> String {
    non_blank(request.customer_name.as_deref())
        .unwrap_or(GUEST_CUSTOMER)
        .to_string()
}

/// Email from the top-level field, then `contact`, then `shipping`.
pub fn resolve_email(request: &OrderRequest) -> Option<&str> {
    non_blank(request.email.as_deref())
        .or_else(|| non_blank(request.contact.as_ref().map(|c| c.email.as_str())))
        .or_else(|| non_blank(request.shipping.as_ref().and_then(|s| s.email.as_deref())))
}

/// Phone from the top-level field, then `contact`, then `shipping`.
pub fn resolve_phone(request: &OrderRequest) -> Option<&str> {
    non_blank(request.phone.as_deref())
        .or_else(|| non_blank(request.contact.as_ref().map(|c| c.phone.as_str())))
        .or_else(|| non_blank(request.shipping.as_ref().and_then(|s| s.phone.as_deref())))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    non_blank(Some(value)).unwrap_or(placeholder).to_string()
}

/// Assembles the hosted checkout payload for a created order.
pub fn build_payment_data(
    request: &OrderRequest,
    order_id: &str,
    merchant: &MerchantCredentials,
    urls: &PaymentUrls,
) -> PaymentData {
    let amount = format_amount(order_total(&request.items));
    let hash = payment_hash(
        &merchant.merchant_id,
        order_id,
        &amount,
        ORDER_CURRENCY,
        &merchant.merchant_secret,
    );

    let shipping = request.shipping.clone().unwrap_or_default();

    PaymentData {
        merchant_id: merchant.merchant_id.clone(),
        return_url: urls.return_url.clone(),
        cancel_url: urls.cancel_url.clone(),
        notify_url: urls.notify_url.clone(),
        order_id: order_id.to_string(),
        items: request
            .items
            .first()
            .map(|item| or_placeholder(&item.item_code, GENERIC_ITEM_LABEL))
            .unwrap_or_else(|| GENERIC_ITEM_LABEL.to_string()),
        currency: ORDER_CURRENCY.to_string(),
        amount,
        first_name: or_placeholder(&shipping.first_name, PLACEHOLDER_FIRST_NAME),
        last_name: or_placeholder(&shipping.last_name, PLACEHOLDER_LAST_NAME),
        email: resolve_email(request)
            .unwrap_or(PLACEHOLDER_EMAIL)
            .to_string(),
        phone: resolve_phone(request)
            .unwrap_or(PLACEHOLDER_PHONE)
            .to_string(),
        address: or_placeholder(&shipping.address, PLACEHOLDER_ADDRESS),
        city: or_placeholder(&shipping.city, PLACEHOLDER_CITY),
        country: PAYMENT_COUNTRY.to_string(),
        hash,
    }
}

/// Produces a one-line summary of the ordered items, e.g. `"2x G1, 1x R5"`.
pub fn format_item_summary(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.item_code))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(code: &str, quantity: u32, price: f64) -> OrderItem {
        OrderItem {
            item_code: code.into(),
            quantity,
            price,
        }
    }

    fn merchant() -> MerchantCredentials {
        MerchantCredentials {
            merchant_id: "1224574".into(),
            merchant_secret: "S3CR3T".into(),
        }
    }

    fn urls() -> PaymentUrls {
        PaymentUrls {
            checkout_url: "https://sandbox.payhere.lk/pay/checkout".into(),
            return_url: "http://shop.test/payment-success".into(),
            cancel_url: "http://shop.test/payment-failure".into(),
            notify_url: "http://shop.test/api/payhere-notify".into(),
        }
    }

    #[test]
    fn hash_matches_reference_value() {
        let amount = format_amount(1500.0);
        assert_eq!(amount, "1500.00");

        let hash = payment_hash("1224574", "SO-ICK-0001", &amount, "LKR", "S3CR3T");
        assert_eq!(hash, "D0A8F93D88BA973D6054602F0AEC04DA");
    }

    #[test]
    fn hash_is_deterministic() {
        let a = payment_hash("1224574", "SO-ICK-0042", "250.50", "LKR", "S3CR3T");
        let b = payment_hash("1224574", "SO-ICK-0042", "250.50", "LKR", "S3CR3T");
        assert_eq!(a, b);
        assert_eq!(a, "38B34C865C5FF1FC991484848AC84A84");
    }

    #[test]
    fn validation_rejects_bad_items() {
        let empty = OrderRequest::default();
        assert!(matches!(validate_order(&empty), Err(ApiError::BadRequest(_))));

        let zero_qty = OrderRequest {
            items: vec![item("G1", 0, 10.0)],
            ..Default::default()
        };
        assert!(matches!(validate_order(&zero_qty), Err(ApiError::BadRequest(_))));

        let negative = OrderRequest {
            items: vec![item("G1", 1, -1.0)],
            ..Default::default()
        };
        assert!(matches!(validate_order(&negative), Err(ApiError::BadRequest(_))));

        let blank_code = OrderRequest {
            items: vec![item("  ", 1, 1.0)],
            ..Default::default()
        };
        assert!(matches!(validate_order(&blank_code), Err(ApiError::BadRequest(_))));

        let ok = OrderRequest {
            items: vec![item("G1", 1, 0.0)],
            ..Default::default()
        };
        assert!(validate_order(&ok).is_ok());
    }

    #[test]
    fn payment_data_uses_placeholders_for_missing_fields() {
        let request = OrderRequest {
            items: vec![item("G1", 2, 100.0), item("R5", 1, 50.25)],
            ..Default::default()
        };

        let data = build_payment_data(&request, "SO-ICK-0009", &merchant(), &urls());

        assert_eq!(data.amount, "250.25");
        assert_eq!(data.items, "G1");
        assert_eq!(data.currency, "LKR");
        assert_eq!(data.first_name, PLACEHOLDER_FIRST_NAME);
        assert_eq!(data.email, PLACEHOLDER_EMAIL);
        assert_eq!(data.city, PLACEHOLDER_CITY);
        assert_eq!(data.country, "Sri Lanka");
        assert_eq!(
            data.hash,
            payment_hash("1224574", "SO-ICK-0009", "250.25", "LKR", "S3CR3T")
        );
    }

    #[test]
    fn contact_details_resolve_in_order() {
        let request = OrderRequest {
            items: vec![item("G1", 1, 1.0)],
            contact: Some(Contact {
                email: "contact@shop.lk".into(),
                phone: String::new(),
            }),
            shipping: Some(ShippingAddress {
                phone: Some("0711111111".into()),
                ..Default::default()
            }),
            ..Default::default()
        };

        assert_eq!(resolve_email(&request), Some("contact@shop.lk"));
        assert_eq!(resolve_phone(&request), Some("0711111111"));
        assert_eq!(customer_name(&request), GUEST_CUSTOMER);
    }

    #[test]
    fn item_summary_lists_quantities() {
        let items = vec![item("G1", 2, 1.0), item("R5", 1, 1.0)];
        assert_eq!(format_item_summary(&items), "2x G1, 1x R5");
    }
}
