//! Raw JSON access to the review backend.
//!
//! The port speaks `serde_json::Value` so the application layer owns the
//! shape of every payload and the adapter stays a thin transport.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::AccessToken;

/// Transport-level failure of a backend call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// 401/403 from the backend
    #[error("Not authorized")]
    Unauthorized,

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Network(String),

    /// Non-success status; `message` is the body's human-readable text, if any
    #[error("Server returned {status}")]
    Server { status: u16, message: Option<String> },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewApiPort: Send + Sync {
    /// GET `path` (relative to the API base URL).
    async fn get_json(&self, path: &str, token: &AccessToken) -> Result<Value, ApiError>;

    /// POST `body` as JSON to `path`. Any 2xx counts as success; a response
    /// body that is empty or not JSON yields `Value::Null`.
    async fn post_json(
        &self,
        path: &str,
        body: &Value,
        token: &AccessToken,
    ) -> Result<Value, ApiError>;
}
