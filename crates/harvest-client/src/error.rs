//! Client error types.

use thiserror::Error;

/// Generic failure message shown when the backend gives us nothing better.
///
/// Spelling matches the string the web storefront ships.
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occured!";

/// Errors from the HTTP layer itself, before any response is available.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Could not reach the backend.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// Failed to build or read a request or response body.
    #[error("Request failed: {0}")]
    Body(String),
}

/// Errors surfaced by [`ApiClient`](crate::ApiClient) calls.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Access token rejected and the refresh attempt failed; both tokens
    /// have been cleared from the store.
    #[error("Session expired")]
    SessionExpired,

    /// No usable response from the backend.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Success response whose body does not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Reading or writing the local token/cart store failed.
    #[error(transparent)]
    Storage(#[from] harvest_store::StoreError),

    /// Base URL missing or malformed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// The user-facing message.
    ///
    /// API errors surface the backend's own words; transport and decode
    /// failures fall back to the storefront's generic message.
    pub fn message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::SessionExpired => {
                "Your session has expired. Please sign in again.".to_string()
            }
            ClientError::Transport(_) | ClientError::Decode(_) => {
                FALLBACK_ERROR_MESSAGE.to_string()
            }
            ClientError::Storage(e) => e.to_string(),
            ClientError::InvalidBaseUrl(_) => self.to_string(),
        }
    }

    /// HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check for a 401 that survived the refresh path.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}

/// Pull the display message out of an error body.
///
/// The backend is inconsistent: most errors carry an `error` field, a few
/// carry `message`, and some (proxies, crashes) are not JSON at all.
pub(crate) fn extract_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
        if let Some(msg) = value.get("message").and_then(|v| v.as_str()) {
            return msg.to_string();
        }
    }
    FALLBACK_ERROR_MESSAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_error_field() {
        let body = br#"{"error": "Only pending orders can be deleted.", "message": "other"}"#;
        assert_eq!(extract_message(body), "Only pending orders can be deleted.");
    }

    #[test]
    fn test_extract_falls_back_to_message_field() {
        let body = br#"{"message": "Order deleted successfully."}"#;
        assert_eq!(extract_message(body), "Order deleted successfully.");
    }

    #[test]
    fn test_extract_fallback_for_non_json() {
        assert_eq!(extract_message(b"<html>502 Bad Gateway</html>"), FALLBACK_ERROR_MESSAGE);
        assert_eq!(extract_message(br#"{"detail": 42}"#), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_message_rules() {
        let api = ClientError::Api {
            status: 400,
            message: "Image must not be larger than 5MB.".to_string(),
        };
        assert_eq!(api.message(), "Image must not be larger than 5MB.");
        assert_eq!(api.status(), Some(400));

        let transport = ClientError::Transport(TransportError::Timeout);
        assert_eq!(transport.message(), FALLBACK_ERROR_MESSAGE);
        assert_eq!(transport.status(), None);

        let decode = ClientError::Decode("missing field `id`".to_string());
        assert_eq!(decode.message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_unauthorized_check() {
        let unauthorized = ClientError::Api {
            status: 401,
            message: "x".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!ClientError::SessionExpired.is_unauthorized());
    }
}
