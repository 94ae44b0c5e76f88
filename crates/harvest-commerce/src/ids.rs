//! Newtype IDs for type-safe identifiers.
//!
//! The backend hands out numeric row ids; wrapping them prevents passing a
//! CartItemId where a ProductId is expected. The cart code is the one
//! client-generated identifier and gets its own type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs over the backend's numeric ids.
macro_rules! define_id {
    ($name:ident) => {
        /// A unique identifier.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend id.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw id.
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

// Define all ID types
define_id!(ProductId);
define_id!(CartId);
define_id!(CartItemId);
define_id!(OrderId);
define_id!(OrderItemId);

/// Client-generated opaque identifier for an anonymous cart.
///
/// Generated once per installation, persisted, and replaced only after a
/// verified payment. The backend creates the cart row the first time it sees
/// the code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartCode(String);

impl CartCode {
    /// Wrap an existing code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Generate a fresh code from the current time plus a random suffix.
    pub fn generate() -> Self {
        Self(format!("cart_{}_{}", current_millis(), random_suffix()))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CartCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CartCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CartCode {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CartCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Generate a short URL-safe random suffix.
fn random_suffix() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::Rng;

    let bytes: [u8; 4] = rand::thread_rng().gen();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Get current Unix timestamp in milliseconds.
fn current_millis() -> u128 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ProductId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_id_serde_is_bare_number() {
        let id = CartItemId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: CartItemId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_cart_code_shape() {
        let code = CartCode::generate();
        assert!(code.as_str().starts_with("cart_"));

        let mut parts = code.as_str().splitn(3, '_');
        assert_eq!(parts.next(), Some("cart"));
        let millis = parts.next().unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        let suffix = parts.next().unwrap();
        assert_eq!(suffix.len(), 6);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_cart_codes_unique() {
        let a = CartCode::generate();
        let b = CartCode::generate();
        assert_ne!(a, b);
    }
}
