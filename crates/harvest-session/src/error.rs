use harvest_client::{ClientError, FALLBACK_ERROR_MESSAGE};
use harvest_commerce::error::CommerceError;
use harvest_store::StoreError;
use thiserror::Error;

/// Errors from session operations.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The backend call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A local cart or money rule blocked the operation.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Reading or writing local state failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// The user-facing message, following the client's fallback rules.
    pub fn message(&self) -> String {
        match self {
            SessionError::Client(error) => error.message(),
            SessionError::Commerce(error) => error.to_string(),
            SessionError::Store(error) => error.to_string(),
        }
    }

    /// Check for a session that expired mid-operation.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, SessionError::Client(ClientError::SessionExpired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_passthrough() {
        let api = SessionError::Client(ClientError::Api {
            status: 404,
            message: "Cartitem not found.".to_string(),
        });
        assert_eq!(api.message(), "Cartitem not found.");

        let guard = SessionError::Commerce(CommerceError::QuantityFloor);
        assert_eq!(guard.message(), "Cart item quantity cannot go below 1");

        let decode = SessionError::Client(ClientError::Decode("bad".to_string()));
        assert_eq!(decode.message(), FALLBACK_ERROR_MESSAGE);
    }

    #[test]
    fn test_session_expired_check() {
        let expired = SessionError::Client(ClientError::SessionExpired);
        assert!(expired.is_session_expired());
        assert!(!SessionError::Commerce(CommerceError::Overflow).is_session_expired());
    }
}
