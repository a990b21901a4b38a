//! Display formatting helpers
//!
//! Small, pure functions turning prices, dates and identifiers into the
//! strings shown on the storefront. `format_amount` is the exception: its
//! output is fed to the payment hash and must stay byte-stable.

use chrono::{DateTime, TimeZone};

use crate::orders::models::ShippingAddress;

/// Formats an amount with exactly two decimals and no grouping.
///
/// Rounds the exact binary value of `amount` to the nearest cent, halves away
/// from zero, so `2.675` (stored as `2.67499999...`) becomes `"2.67"`.
/// Independent of locale. Non-finite input formats as `"0.00"`.
///
/// Example output: `"1500.00"`.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return "0.00".to_string();
    }

    // 25 places resolve every cent tie an f64 can be near
    let exact = format!("{:.25}", amount.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let (cent_digits, rest) = fraction.split_at(fraction.len().min(2));

    let mut cents = whole.parse::<u128>().unwrap_or(0) * 100 + cent_digits.parse::<u128>().unwrap_or(0);
    if rest.starts_with(['5', '6', '7', '8', '9']) {
        cents += 1;
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, cents / 100, cents % 100)
}

/// Formats a price for display, using Indian digit grouping.
///
/// INR gets the rupee sign, every other currency is prefixed by its code.
///
/// Example output: `"LKR 1,50,000.00"`, `"₹250.50"`.
pub fn format_price(amount: f64, currency: &str) -> String {
    let plain = format_amount(amount);
    let (negative, plain) = match plain.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, plain.as_str()),
    };
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain, "00"));
    let grouped = group_indian(whole);
    let sign = if negative { "-" } else { "" };

    match currency {
        "INR" => format!("{sign}₹{grouped}.{fraction}"),
        code => format!("{sign}{code} {grouped}.{fraction}"),
    }
}

/// Groups the last three digits, then pairs: `1234567` becomes `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Formats a timestamp as `"19 October 2026, 03:05 PM"`.
pub fn format_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format("%-d %B %Y, %I:%M %p").to_string()
}

/// Prefixes `#` and left-pads with zeros to six characters.
///
/// Example output: `"#000042"`. Empty input yields an empty string.
pub fn format_order_id(order_id: &str) -> String {
    if order_id.is_empty() {
        return String::new();
    }
    format!("#{:0>6}", order_id)
}

/// Formats a ten digit phone number as `xxx-xxx-xxxx`.
///
/// Anything that does not reduce to exactly ten digits is returned as given.
pub fn format_phone_number(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 10 {
        return phone.to_string();
    }
    format!("{}-{}-{}", &digits[..3], &digits[3..6], &digits[6..])
}

/// Renders a shipping address as newline separated lines, skipping blanks.
pub fn format_address(shipping: &ShippingAddress) -> String {
    let name = format!("{} {}", shipping.first_name, shipping.last_name);
    let locality = format!("{}, {} {}", shipping.city, shipping.state, shipping.zip_code);

    [
        name.trim(),
        shipping.address.trim(),
        shipping.apartment.as_deref().unwrap_or("").trim(),
        locality.trim_matches(|c: char| c == ',' || c.is_whitespace()),
    ]
    .into_iter()
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join("\n")
}

/// Appends an optional unit: `format_quantity(3, "kg")` is `"3 kg"`.
pub fn format_quantity(quantity: u32, unit: &str) -> String {
    if unit.is_empty() {
        quantity.to_string()
    } else {
        format!("{quantity} {unit}")
    }
}

/// Formats a ratio as a percentage with two decimals (`0.125` is `"12.50%"`).
pub fn format_percentage(value: f64) -> String {
    format!("{}%", format_amount(value * 100.0))
}
