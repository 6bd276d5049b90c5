//! Account identifiers and hex helpers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An account reference on the wire (`{address, metadata?}`).
///
/// `address` holds a `0x`-prefixed hex string: either a full address or a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl AccountIdentifier {
    /// Create an identifier, normalising the address to carry a `0x` prefix.
    pub fn new(address: impl AsRef<str>) -> Self {
        Self {
            address: normalize_hex(address.as_ref()),
            metadata: None,
        }
    }
}

impl fmt::Display for AccountIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

/// Strip an optional `0x` / `0X` prefix.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Return `s` with exactly one lowercase `0x` prefix.
pub fn normalize_hex(s: &str) -> String {
    format!("0x{}", strip_hex_prefix(s))
}
