//! Signing payloads, signatures, and the external wallet capability.
//!
//! Key derivation and the signature scheme itself live outside this workspace.
//! The construction pipeline only moves hex strings between the node and a
//! [`WalletKeys`] implementation; it never interprets them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::account::AccountIdentifier;

/// Curve / signature type tag. Mochimo only uses WOTS+.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureType {
    #[serde(rename = "wotsp")]
    Wotsp,
}

/// A public key on the wire (`{hex_bytes, curve_type}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub hex_bytes: String,
    pub curve_type: SignatureType,
}

impl PublicKey {
    pub fn wotsp(hex_bytes: impl Into<String>) -> Self {
        Self {
            hex_bytes: hex_bytes.into(),
            curve_type: SignatureType::Wotsp,
        }
    }
}

/// Bytes the node asks an account to sign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningPayload {
    pub hex_bytes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_identifier: Option<AccountIdentifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_type: Option<SignatureType>,
}

/// A signature assembled for `/construction/combine`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub signing_payload: SigningPayload,
    pub public_key: PublicKey,
    pub signature_type: SignatureType,
    pub hex_bytes: String,
}

impl Signature {
    /// Wrap externally produced signature bytes for the payload the node issued.
    ///
    /// The account identifier the node attached to the payload is not echoed
    /// back; the combine step keys signatures by payload bytes.
    pub fn wotsp(payload: &SigningPayload, public_key_hex: &str, signature: &[u8]) -> Self {
        Self {
            signing_payload: SigningPayload {
                hex_bytes: payload.hex_bytes.clone(),
                account_identifier: None,
                signature_type: Some(SignatureType::Wotsp),
            },
            public_key: PublicKey::wotsp(public_key_hex),
            signature_type: SignatureType::Wotsp,
            hex_bytes: hex::encode(signature),
        }
    }
}

/// Failure reported by an external signer.
#[derive(Debug, Error)]
#[error("signer error: {0}")]
pub struct SignerError(pub String);

/// The wallet capability the pipeline consumes.
///
/// Implementations own the one-time key, its address and tag. `sign` receives
/// the raw unsigned transaction bytes and returns the signature over their
/// hash; hashing is part of the signer's scheme.
pub trait WalletKeys: Send + Sync {
    /// Full source address, hex encoded.
    fn address(&self) -> String;

    /// Account tag, hex encoded.
    fn tag(&self) -> String;

    /// Public key, hex encoded.
    fn public_key(&self) -> String;

    /// Sign the hash of `message`.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, SignerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signature_wire_shape() {
        let payload = SigningPayload {
            hex_bytes: "abcd".into(),
            account_identifier: Some(AccountIdentifier::new("0x01")),
            signature_type: None,
        };
        let sig = Signature::wotsp(&payload, "beef", &[0xde, 0xad]);
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "signing_payload": { "hex_bytes": "abcd", "signature_type": "wotsp" },
                "public_key": { "hex_bytes": "beef", "curve_type": "wotsp" },
                "signature_type": "wotsp",
                "hex_bytes": "dead"
            })
        );
    }

    #[test]
    fn signature_bytes_keep_leading_zeros() {
        let payload = SigningPayload {
            hex_bytes: "00".into(),
            account_identifier: None,
            signature_type: None,
        };
        let sig = Signature::wotsp(&payload, "beef", &[0x00, 0x0f, 0xa0]);
        assert_eq!(sig.hex_bytes, "000fa0");
    }

    #[test]
    fn payload_without_signature_type_deserializes() {
        let payload: SigningPayload =
            serde_json::from_str(r#"{"hex_bytes":"00ff","account_identifier":{"address":"0xaa"}}"#)
                .unwrap();
        assert_eq!(payload.hex_bytes, "00ff");
        assert_eq!(payload.signature_type, None);
    }
}
