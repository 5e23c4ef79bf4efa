//! Wishlist API Port - boundary to the remote authoritative wishlist
//!
//! Adapters translate the backend's numeric `status_code` envelope into a
//! tagged result: `Ok(MutationAck)` for confirmed success, `Err(ApiError)`
//! for everything else. Callers never look at raw status codes.

use async_trait::async_trait;
use thiserror::Error;

use eventhub_domain::{Credential, EventId};

/// Errors returned by the remote wishlist API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Request could not be completed (offline, DNS, connection reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the client-side timeout.
    #[error("Request timed out")]
    Timeout,

    /// Credential missing or rejected by the server (HTTP 401/403).
    #[error("Credential rejected (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Non-2xx response that is not an auth failure.
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Http { status: u16, message: Option<String> },

    /// Well-formed response without the success sentinel.
    #[error("Rejected by server (status_code {status_code}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status_code: i64,
        message: Option<String>,
    },

    /// Response body could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Server-supplied human-readable message, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } | ApiError::Rejected { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

/// Confirmed add/remove.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationAck {
    pub message: Option<String>,
}

impl MutationAck {
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WishlistApiPort: Send + Sync {
    /// `GET .../wishlist/` - ids of every favorited event.
    async fn list(&self, credential: &Credential) -> Result<Vec<EventId>, ApiError>;

    /// `POST .../wishlist/add/{id}/`
    async fn add(&self, credential: &Credential, event_id: &EventId)
        -> Result<MutationAck, ApiError>;

    /// `DELETE .../wishlist/remove/{id}/`
    async fn remove(
        &self,
        credential: &Credential,
        event_id: &EventId,
    ) -> Result<MutationAck, ApiError>;
}
