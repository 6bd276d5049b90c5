//! Request and response bodies of each endpoint.
//!
//! Requests omit `network_identifier`; the client adds it to every body.

use serde::{Deserialize, Deserializer, Serialize};

use mochimo_types::{
    AccountIdentifier, Amount, BlockIdentifier, ConstructionMetadata, Operation,
    PreprocessMetadata, PreprocessOptions, PublicKey, Signature, SigningPayload,
    TransactionIdentifier,
};

pub const PREPROCESS_PATH: &str = "/construction/preprocess";
pub const METADATA_PATH: &str = "/construction/metadata";
pub const PAYLOADS_PATH: &str = "/construction/payloads";
pub const COMBINE_PATH: &str = "/construction/combine";
pub const SUBMIT_PATH: &str = "/construction/submit";
pub const PARSE_PATH: &str = "/construction/parse";
pub const BALANCE_PATH: &str = "/account/balance";
pub const MEMPOOL_PATH: &str = "/mempool";
pub const MEMPOOL_TRANSACTION_PATH: &str = "/mempool/transaction";
pub const CALL_PATH: &str = "/call";

/// Method name of the tag lookup behind `/call`.
pub const TAG_RESOLVE_METHOD: &str = "tag_resolve";

// ── Preprocess ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PreprocessRequest<'a> {
    pub operations: &'a [Operation],
    pub metadata: &'a PreprocessMetadata,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PreprocessResponse {
    pub options: PreprocessOptions,
    #[serde(default)]
    pub required_public_keys: Vec<AccountIdentifier>,
}

// ── Metadata ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MetadataRequest<'a> {
    pub options: &'a PreprocessOptions,
    pub public_keys: &'a [PublicKey],
}

#[derive(Clone, Debug, Deserialize)]
pub struct MetadataResponse {
    pub metadata: ConstructionMetadata,
    #[serde(default)]
    pub suggested_fee: Vec<Amount>,
}

// ── Payloads ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct PayloadsRequest<'a> {
    pub operations: &'a [Operation],
    pub metadata: &'a ConstructionMetadata,
    pub public_keys: &'a [PublicKey],
}

#[derive(Clone, Debug, Deserialize)]
pub struct PayloadsResponse {
    pub unsigned_transaction: String,
    #[serde(default)]
    pub payloads: Vec<SigningPayload>,
}

// ── Combine / submit / parse ─────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CombineRequest<'a> {
    pub unsigned_transaction: &'a str,
    pub signatures: &'a [Signature],
}

#[derive(Clone, Debug, Deserialize)]
pub struct CombineResponse {
    pub signed_transaction: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub signed_transaction: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SubmitResponse {
    #[serde(default)]
    pub transaction_identifier: Option<TransactionIdentifier>,
}

#[derive(Debug, Serialize)]
pub struct ParseRequest<'a> {
    pub transaction: &'a str,
    pub signed: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ParseResponse {
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub account_identifier_signers: Vec<AccountIdentifier>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

// ── Account ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AccountBalanceRequest<'a> {
    pub account_identifier: &'a AccountIdentifier,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AccountBalanceResponse {
    pub block_identifier: BlockIdentifier,
    #[serde(default)]
    pub balances: Vec<Amount>,
}

impl AccountBalanceResponse {
    /// The MCM entry of `balances`, if the node reported one.
    pub fn mcm(&self) -> Option<&Amount> {
        self.balances.iter().find(|a| a.is_mcm())
    }
}

#[derive(Debug, Serialize)]
pub struct CallRequest<'a> {
    pub method: &'a str,
    pub parameters: serde_json::Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CallResponse<R> {
    pub result: R,
    #[serde(default)]
    pub idempotent: bool,
}

/// Result of `tag_resolve`: the address currently holding a tag and its balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagResolution {
    pub address: String,
    #[serde(deserialize_with = "u64_from_string_or_number")]
    pub amount: u64,
}

// ── Mempool ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct EmptyRequest {}

#[derive(Clone, Debug, Deserialize)]
pub struct MempoolResponse {
    #[serde(default)]
    pub transaction_identifiers: Vec<TransactionIdentifier>,
}

#[derive(Debug, Serialize)]
pub struct MempoolTransactionRequest<'a> {
    pub transaction_identifier: &'a TransactionIdentifier,
}

/// A transaction as the mempool reports it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MempoolTransaction {
    pub transaction_identifier: TransactionIdentifier,
    #[serde(default)]
    pub operations: Vec<Operation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MempoolTransactionResponse {
    pub transaction: MempoolTransaction,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

fn u64_from_string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("{n} is not a u64"))),
        serde_json::Value::String(s) => s.parse().map_err(serde::de::Error::custom),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_resolution_accepts_string_amount() {
        let r: TagResolution =
            serde_json::from_str(r#"{"address":"0xabc","amount":"1500"}"#).unwrap();
        assert_eq!(r.amount, 1500);
        let r: TagResolution = serde_json::from_str(r#"{"address":"0xabc","amount":7}"#).unwrap();
        assert_eq!(r.amount, 7);
    }

    #[test]
    fn tag_resolution_rejects_negative_amount() {
        assert!(serde_json::from_str::<TagResolution>(r#"{"address":"0x1","amount":-1}"#).is_err());
    }

    #[test]
    fn submit_response_without_identifier() {
        let r: SubmitResponse = serde_json::from_str("{}").unwrap();
        assert!(r.transaction_identifier.is_none());
    }

    #[test]
    fn balance_picks_mcm_entry() {
        let r: AccountBalanceResponse = serde_json::from_value(serde_json::json!({
            "block_identifier": { "index": 10, "hash": "0xbb" },
            "balances": [
                { "value": "7", "currency": { "symbol": "XYZ", "decimals": 0 } },
                { "value": "1000", "currency": { "symbol": "MCM", "decimals": 9 } }
            ]
        }))
        .unwrap();
        assert_eq!(r.mcm().unwrap().value, "1000");
    }

    #[test]
    fn payloads_request_shape() {
        let metadata = ConstructionMetadata::default();
        let request = PayloadsRequest {
            operations: &[],
            metadata: &metadata,
            public_keys: &[PublicKey::wotsp("aa")],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "operations": [],
                "metadata": {},
                "public_keys": [{ "hex_bytes": "aa", "curve_type": "wotsp" }]
            })
        );
    }
}
