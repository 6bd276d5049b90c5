//! RPC error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    /// The request never produced a response.
    #[error("transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    /// The node answered with a non-success status and no error envelope.
    #[error("node returned HTTP {status} for {path}")]
    HttpStatus { path: String, status: u16 },

    /// The node answered with an error envelope.
    #[error("node error {code} on {path}: {message}")]
    Protocol {
        path: String,
        code: i64,
        message: String,
        retriable: bool,
    },

    #[error("invalid response from {path}: {message}")]
    InvalidResponse { path: String, message: String },

    #[error("submit response carried no transaction hash")]
    MissingTransactionHash,

    #[error("request body for {path} is not a JSON object")]
    InvalidRequest { path: String },
}

impl RpcError {
    /// Whether the node flagged this failure as retriable.
    ///
    /// Informational only: nothing in this workspace retries construction calls.
    pub fn is_retriable(&self) -> bool {
        matches!(self, Self::Protocol { retriable: true, .. })
    }
}

/// The error object a node returns instead of a result.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub retriable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Code reported when the node's `code` is not an integer.
    pub const UNKNOWN_CODE: i64 = -1;

    /// Extract an envelope from a response body, if it is one.
    ///
    /// Any object carrying `code` is an envelope. Missing or malformed
    /// fields fall back: an unparseable code becomes [`Self::UNKNOWN_CODE`],
    /// a missing message becomes the raw body text, `retriable` defaults to false.
    pub fn from_body(body: &serde_json::Value) -> Option<Self> {
        let object = body.as_object()?;
        let code = object.get("code")?;
        let code = code
            .as_i64()
            .or_else(|| code.as_str().and_then(|s| s.trim().parse().ok()))
            .unwrap_or(Self::UNKNOWN_CODE);
        let message = object
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string());
        let retriable = object
            .get("retriable")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);

        Some(Self {
            code,
            message,
            retriable,
            details: object.get("details").cloned(),
        })
    }

    pub fn into_error(self, path: &str) -> RpcError {
        RpcError::Protocol {
            path: path.to_string(),
            code: self.code,
            message: self.message,
            retriable: self.retriable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_detected_by_code_field() {
        let body = serde_json::json!({ "code": 12, "message": "bad options", "retriable": true });
        let envelope = ErrorEnvelope::from_body(&body).unwrap();
        assert_eq!(envelope.code, 12);
        let err = envelope.into_error("/construction/metadata");
        assert!(err.is_retriable());
        assert_eq!(
            err.to_string(),
            "node error 12 on /construction/metadata: bad options"
        );
    }

    #[test]
    fn result_bodies_are_not_envelopes() {
        let body = serde_json::json!({ "signed_transaction": "00ff" });
        assert!(ErrorEnvelope::from_body(&body).is_none());
        assert!(ErrorEnvelope::from_body(&serde_json::json!([1, 2])).is_none());
    }

    #[test]
    fn partial_envelopes_are_still_envelopes() {
        let envelope = ErrorEnvelope::from_body(&serde_json::json!({ "code": 7 })).unwrap();
        assert_eq!(envelope.code, 7);
        assert_eq!(envelope.message, r#"{"code":7}"#);
        assert!(!envelope.retriable);

        let envelope =
            ErrorEnvelope::from_body(&serde_json::json!({ "code": "E7", "message": "bad" })).unwrap();
        assert_eq!(envelope.code, ErrorEnvelope::UNKNOWN_CODE);
        assert_eq!(envelope.message, "bad");

        let envelope =
            ErrorEnvelope::from_body(&serde_json::json!({ "code": "12", "retriable": "yes" })).unwrap();
        assert_eq!(envelope.code, 12);
        assert!(!envelope.retriable);
    }

    #[test]
    fn envelope_without_retriable_defaults_false() {
        let body = serde_json::json!({ "code": 2, "message": "nope" });
        let err = ErrorEnvelope::from_body(&body).unwrap().into_error("/mempool");
        assert!(!err.is_retriable());
    }
}
