//! Operations: the accounting effects a transfer is expressed as.

use serde::{Deserialize, Serialize};

use crate::account::AccountIdentifier;
use crate::amount::Amount;
use crate::params::STATUS_SUCCESS;

/// The three operation kinds of a Mochimo transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    SourceTransfer,
    DestinationTransfer,
    Fee,
}

impl OperationType {
    /// Canonical position of this operation within a transfer.
    pub fn index(&self) -> u64 {
        match self {
            Self::SourceTransfer => 0,
            Self::DestinationTransfer => 1,
            Self::Fee => 2,
        }
    }
}

/// Operation status as reported on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperationStatus(pub String);

impl OperationStatus {
    pub fn success() -> Self {
        Self(STATUS_SUCCESS.to_string())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationIdentifier {
    pub index: u64,
}

/// Per-operation metadata. Only the destination credit carries a memo.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// One operation in an ordered operation list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationIdentifier,
    #[serde(rename = "type")]
    pub kind: OperationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OperationStatus>,
    pub account: AccountIdentifier,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<OperationMetadata>,
}

impl Operation {
    pub fn index(&self) -> u64 {
        self.operation_identifier.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_type_wire_names() {
        assert_eq!(
            serde_json::to_value(OperationType::SourceTransfer).unwrap(),
            "SOURCE_TRANSFER"
        );
        assert_eq!(
            serde_json::to_value(OperationType::DestinationTransfer).unwrap(),
            "DESTINATION_TRANSFER"
        );
        assert_eq!(serde_json::to_value(OperationType::Fee).unwrap(), "FEE");
    }

    #[test]
    fn operation_round_trips_through_wire_json() {
        let json = serde_json::json!({
            "operation_identifier": { "index": 1 },
            "type": "DESTINATION_TRANSFER",
            "status": "SUCCESS",
            "account": { "address": "0xabc" },
            "amount": { "value": "10000", "currency": { "symbol": "MCM", "decimals": 9 } },
            "metadata": { "memo": "AB-00-EF" }
        });
        let op: Operation = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(op.index(), 1);
        assert_eq!(op.kind, OperationType::DestinationTransfer);
        assert_eq!(op.metadata.as_ref().unwrap().memo.as_deref(), Some("AB-00-EF"));
        assert_eq!(serde_json::to_value(&op).unwrap(), json);
    }

    #[test]
    fn parsed_operation_without_status_is_accepted() {
        let op: Operation = serde_json::from_value(serde_json::json!({
            "operation_identifier": { "index": 2 },
            "type": "FEE",
            "account": { "address": "0x01" },
            "amount": { "value": "500", "currency": { "symbol": "MCM", "decimals": 9 } }
        }))
        .unwrap();
        assert!(op.status.is_none());
        assert_eq!(op.kind.index(), 2);
    }
}
