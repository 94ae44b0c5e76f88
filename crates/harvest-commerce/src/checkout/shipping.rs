//! Shipping address types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CommerceError;

/// A customer's shipping address.
///
/// The backend stores and returns snake_case fields but the save endpoint
/// reads camelCase keys from the request body, so the request payload is
/// built by [`ShippingInfo::request_body`] rather than by serializing the
/// struct directly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingInfo {
    /// Full name for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check that every field is filled, in the order the backend validates.
    ///
    /// The error names the field by its request key (camelCase), matching
    /// what the backend would reject it as.
    pub fn is_complete(&self) -> Result<(), CommerceError> {
        let fields: [(&'static str, &str); 7] = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(CommerceError::IncompleteShipping(name));
            }
        }
        Ok(())
    }

    /// Build the request payload for the save endpoint.
    pub fn request_body(&self) -> Value {
        json!({
            "firstName": self.first_name,
            "lastName": self.last_name,
            "email": self.email,
            "address": self.address,
            "city": self.city,
            "state": self.state,
            "zipCode": self.zip_code,
        })
    }
}
