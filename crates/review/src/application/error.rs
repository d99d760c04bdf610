//! Review errors as the reviewer sees them.

use thiserror::Error;
use tradeassoc_domain::{DomainError, RecordId};

use crate::ports::outbound::ApiError;

/// Failure of a review operation.
///
/// Every variant renders as a message suitable for showing to the
/// reviewer as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("Your session has expired. Please sign in again.")]
    AuthRequired,

    #[error("Could not reach the server: {0}")]
    Network(String),

    /// Server message verbatim, or the operation's fallback message
    #[error("{message}")]
    Server { status: Option<u16>, message: String },

    /// Rejected client-side; nothing was sent
    #[error("{0}")]
    Validation(String),

    #[error("Change request {0} is not in the current list")]
    NotFound(RecordId),

    #[error("Change request {0} has already been decided")]
    AlreadyDecided(RecordId),

    #[error("A decision on change request {0} is already in progress")]
    DecisionInFlight(RecordId),

    #[error("Unexpected response from the server: {0}")]
    InvalidResponse(String),
}

impl ReviewError {
    /// Maps a transport failure, using `fallback` when the server sent no message.
    pub fn from_api(error: ApiError, fallback: &str) -> Self {
        match error {
            ApiError::Unauthorized => Self::AuthRequired,
            ApiError::Network(detail) => Self::Network(detail),
            ApiError::Server { status, message } => Self::Server {
                status: Some(status),
                message: message.unwrap_or_else(|| fallback.to_string()),
            },
            ApiError::Parse(detail) => Self::InvalidResponse(detail),
        }
    }

    /// Whether repeating the same action may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Server { .. })
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for ReviewError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Validation(message) => Self::Validation(message),
            DomainError::Parse(message) => Self::InvalidResponse(message),
            DomainError::InvalidStateTransition(message) => Self::Validation(message),
        }
    }
}
