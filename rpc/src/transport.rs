//! Request/response transport beneath the construction client.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::RpcError;

/// Default timeout for a whole request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A decoded response: HTTP status plus JSON body.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl TransportResponse {
    pub fn ok(body: serde_json::Value) -> Self {
        Self { status: 200, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON POST and returns the decoded reply.
///
/// A transport only fails when no usable reply arrived. Error envelopes and
/// non-success statuses are returned as responses for the client to judge.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<TransportResponse, RpcError>;
}

/// HTTP transport backed by a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with default timeout settings.
    pub fn new() -> Result<Self, RpcError> {
        Self::with_timeouts(DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self, RpcError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| RpcError::Transport {
                url: String::new(),
                message: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<TransportResponse, RpcError> {
        let transport_err = |message: String| RpcError::Transport {
            url: url.to_string(),
            message,
        };

        let response = self.http.post(url).json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                transport_err(format!("request timed out: {e}"))
            } else if e.is_connect() {
                transport_err(format!("connection failed: {e}"))
            } else {
                transport_err(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| transport_err(format!("failed to read response body: {e}")))?;

        // Bodies that are not JSON still carry a status worth reporting.
        let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::Null);
        Ok(TransportResponse { status, body })
    }
}
