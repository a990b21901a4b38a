//! Checkout form and its validation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orders::models::{Contact, ShippingAddress};

/// Contact and shipping fields entered at checkout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CheckoutForm {
    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub shipping: ShippingAddress,
}

/// One violated form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Field name as the form posts it, e.g. `zipCode`.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl CheckoutForm {
    /// Checks every required field and reports all violations together.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let shipping = &self.shipping;
        let required = [
            ("email", "Email", self.email.as_str()),
            ("phone", "Phone", self.phone.as_str()),
            ("firstName", "First name", shipping.first_name.as_str()),
            ("lastName", "Last name", shipping.last_name.as_str()),
            ("address", "Address", shipping.address.as_str()),
            ("city", "City", shipping.city.as_str()),
            ("state", "State", shipping.state.as_str()),
            ("zipCode", "Zip code", shipping.zip_code.as_str()),
        ];

        let errors: Vec<FieldError> = required
            .into_iter()
            .filter(|(_, _, value)| value.trim().is_empty())
            .map(|(field, label, _)| FieldError {
                field,
                message: format!("{label} is required"),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn contact(&self) -> Contact {
        Contact {
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}
