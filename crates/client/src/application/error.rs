//! Service layer error types
//!
//! Every public wishlist operation resolves to `Result<_, WishlistError>`;
//! nothing here is allowed to panic past the store boundary.

use thiserror::Error;

use crate::ports::outbound::ApiError;

const SIGN_IN_MESSAGE: &str = "Please sign in to save events to your wishlist.";
const TRANSPORT_MESSAGE: &str = "Could not reach the server. Please check your connection and try again.";
const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";
const GENERIC_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors that can occur in wishlist operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WishlistError {
    /// No credential in the current session
    #[error("Not signed in")]
    NoCredential,

    /// Request could not be completed
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Server rejected the credential
    #[error("Credential rejected by server")]
    Unauthorized,

    /// Server reachable and response well-formed, but no success code
    #[error("Rejected by server: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// Response could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl WishlistError {
    /// Text suitable for a dismissible message in the UI.
    ///
    /// Server-supplied messages are passed through verbatim.
    pub fn user_message(&self) -> String {
        match self {
            WishlistError::NoCredential => SIGN_IN_MESSAGE.to_string(),
            WishlistError::Transport(_) => TRANSPORT_MESSAGE.to_string(),
            WishlistError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            WishlistError::Rejected { message: Some(m) } => m.clone(),
            WishlistError::Rejected { message: None } | WishlistError::Malformed(_) => {
                GENERIC_MESSAGE.to_string()
            }
        }
    }
}

impl From<ApiError> for WishlistError {
    fn from(e: ApiError) -> Self {
        match e {
            ApiError::Transport(msg) => WishlistError::Transport(msg),
            ApiError::Timeout => WishlistError::Transport("request timed out".to_string()),
            ApiError::Unauthorized { .. } => WishlistError::Unauthorized,
            ApiError::Http { message, .. } | ApiError::Rejected { message, .. } => {
                WishlistError::Rejected { message }
            }
            ApiError::Malformed(msg) => WishlistError::Malformed(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_surfaced_verbatim() {
        let err: WishlistError = ApiError::Rejected {
            status_code: 6001,
            message: Some("Event already in wishlist".to_string()),
        }
        .into();
        assert_eq!(err.user_message(), "Event already in wishlist");
    }

    #[test]
    fn missing_server_message_uses_generic_fallback() {
        let err: WishlistError = ApiError::Http {
            status: 500,
            message: None,
        }
        .into();
        assert_eq!(err.user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn timeout_maps_to_transport() {
        let err: WishlistError = ApiError::Timeout.into();
        assert!(matches!(err, WishlistError::Transport(_)));
        assert_eq!(err.user_message(), TRANSPORT_MESSAGE);
    }

    #[test]
    fn auth_errors_are_classified() {
        assert_eq!(
            WishlistError::from(ApiError::Unauthorized { status: 401 }),
            WishlistError::Unauthorized
        );
        assert_eq!(WishlistError::NoCredential.user_message(), SIGN_IN_MESSAGE);
    }
}
