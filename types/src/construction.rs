//! Typed records handed from one construction step to the next.

use serde::{Deserialize, Deserializer, Serialize};

/// Request metadata for `/construction/preprocess`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessMetadata {
    #[serde(deserialize_with = "string_or_number")]
    pub block_to_live: String,
    pub change_pk: String,
    pub change_addr: String,
    #[serde(deserialize_with = "string_or_number")]
    pub source_balance: String,
}

/// Options returned by `/construction/preprocess`, forwarded unchanged to
/// `/construction/metadata`.
///
/// Fields this client does not know are kept in `extra` so the round trip
/// does not drop them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessOptions {
    #[serde(default, deserialize_with = "string_or_number")]
    pub block_to_live: String,
    #[serde(default)]
    pub change_pk: String,
    #[serde(default)]
    pub source_addr: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Construction metadata returned by `/construction/metadata`.
///
/// Its content belongs to the node; it is passed to `/construction/payloads`
/// exactly as received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstructionMetadata(pub serde_json::Map<String, serde_json::Value>);

impl ConstructionMetadata {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Accept `"10"` or `10` and keep the decimal string.
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
