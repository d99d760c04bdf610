//! reqwest-backed implementation of [`ReviewApiPort`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use tradeassoc_shared::ErrorBody;

use crate::infrastructure::config::ReviewConfig;
use crate::infrastructure::correlation::{CorrelationId, CORRELATION_HEADER};
use crate::ports::outbound::{AccessToken, ApiError, ReviewApiPort};

/// HTTP client for the association's review endpoints
#[derive(Clone)]
pub struct HttpReviewApi {
    client: Client,
    base_url: String,
}

impl HttpReviewApi {
    /// No timeout unless one is given; the backend owns request deadlines.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ReviewConfig) -> Self {
        Self::new(config.api_url.as_str(), config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Sends the request and returns the body text of a 2xx response.
    async fn send(&self, request: RequestBuilder, token: &AccessToken) -> Result<String, ApiError> {
        let correlation_id = CorrelationId::new();
        let response = request
            .bearer_auth(token.expose())
            .header(CORRELATION_HEADER, correlation_id.to_string())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(
                    correlation_id = %correlation_id.short(),
                    error = %e,
                    "Review backend unreachable"
                );
                ApiError::Network(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::debug!(
                correlation_id = %correlation_id.short(),
                status = status.as_u16(),
                "Review backend rejected credentials"
            );
            return Err(ApiError::Unauthorized);
        }

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(
                correlation_id = %correlation_id.short(),
                status = status.as_u16(),
                "Review backend returned an error"
            );
            return Err(ApiError::Server {
                status: status.as_u16(),
                message: ErrorBody::from_text(&text).into_message(),
            });
        }

        Ok(text)
    }
}

/// Lists must parse; an empty body reads as `Null`.
fn decode_strict(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// A 2xx decision response is a recorded decision whatever its body; a body
/// that is not JSON reads as `Null`.
fn decode_lenient(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| {
        if !text.trim().is_empty() {
            tracing::debug!(error = %e, "Ignoring non-JSON success body");
        }
        Value::Null
    })
}

#[async_trait]
impl ReviewApiPort for HttpReviewApi {
    async fn get_json(&self, path: &str, token: &AccessToken) -> Result<Value, ApiError> {
        let text = self.send(self.client.get(self.url(path)), token).await?;
        decode_strict(&text)
    }

    async fn post_json(
        &self,
        path: &str,
        body: &Value,
        token: &AccessToken,
    ) -> Result<Value, ApiError> {
        let text = self
            .send(self.client.post(self.url(path)).json(body), token)
            .await?;
        Ok(decode_lenient(&text))
    }
}
