//! The canonical operation list of a transfer.
//!
//! The node matches operations by position: index 0 is the source debit,
//! 1 the destination credit, 2 the fee. Nothing here may reorder them.

use serde::{Deserialize, Serialize};

use mochimo_types::{
    AccountIdentifier, Amount, Operation, OperationIdentifier, OperationMetadata,
    OperationStatus, OperationType,
};

use crate::encoder::TransactionFields;

/// What the caller wants to transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferIntent {
    /// Tag of the paying account (hex).
    pub source_tag: String,
    /// Full address of the paying account (hex).
    pub source_address: String,
    /// Tag of the receiving account (hex).
    pub destination_tag: String,
    /// Transfer amount in nanoMCM.
    pub amount: u64,
    /// Fee in nanoMCM.
    pub fee: u64,
    #[serde(default)]
    pub memo: Option<String>,
}

impl TransferIntent {
    /// Account debited by operation 0: the tag, or the address for untagged sources.
    pub fn source_account(&self) -> &str {
        if self.source_tag.is_empty() {
            &self.source_address
        } else {
            &self.source_tag
        }
    }

    /// Fields for the binary record of this transfer.
    pub fn transaction_fields<'a>(
        &'a self,
        change_pk: &'a str,
        block_to_live: u32,
    ) -> TransactionFields<'a> {
        TransactionFields {
            source_address: &self.source_address,
            destination_tag: &self.destination_tag,
            change_pk,
            amount: self.amount,
            fee: self.fee,
            block_to_live,
            memo: self.memo.as_deref(),
        }
    }
}

/// Build the three operations for `intent`, in index order.
pub fn build_operations(intent: &TransferIntent) -> Vec<Operation> {
    let source = Operation {
        operation_identifier: OperationIdentifier { index: 0 },
        kind: OperationType::SourceTransfer,
        status: Some(OperationStatus::success()),
        account: AccountIdentifier::new(intent.source_account()),
        amount: Amount::debit(intent.amount),
        metadata: None,
    };
    let destination = Operation {
        operation_identifier: OperationIdentifier { index: 1 },
        kind: OperationType::DestinationTransfer,
        status: Some(OperationStatus::success()),
        account: AccountIdentifier::new(&intent.destination_tag),
        amount: Amount::credit(intent.amount),
        metadata: Some(OperationMetadata {
            memo: Some(intent.memo.clone().unwrap_or_default()),
        }),
    };
    let fee = Operation {
        operation_identifier: OperationIdentifier { index: 2 },
        kind: OperationType::Fee,
        status: Some(OperationStatus::success()),
        account: AccountIdentifier::new(&intent.source_tag),
        amount: Amount::credit(intent.fee),
        metadata: None,
    };
    vec![source, destination, fee]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent() -> TransferIntent {
        TransferIntent {
            source_tag: "0x0a0b0c".into(),
            source_address: "0x112233".into(),
            destination_tag: "ddeeff".into(),
            amount: 10_000,
            fee: 500,
            memo: Some("AB-00-EF".into()),
        }
    }

    #[test]
    fn three_operations_in_canonical_order() {
        let ops = build_operations(&intent());
        assert_eq!(ops.len(), 3);
        let kinds: Vec<_> = ops.iter().map(|op| op.kind).collect();
        assert_eq!(
            kinds,
            vec![
                OperationType::SourceTransfer,
                OperationType::DestinationTransfer,
                OperationType::Fee
            ]
        );
        for (i, op) in ops.iter().enumerate() {
            assert_eq!(op.index(), i as u64);
            assert_eq!(op.status, Some(OperationStatus::success()));
            assert_eq!(op.amount.currency.symbol, "MCM");
            assert_eq!(op.amount.currency.decimals, 9);
        }
    }

    #[test]
    fn literal_values() {
        let ops = build_operations(&intent());
        assert_eq!(ops[0].amount.value, "-10000");
        assert_eq!(ops[1].amount.value, "10000");
        assert_eq!(ops[2].amount.value, "500");
        assert_eq!(ops[0].account.address, "0x0a0b0c");
        assert_eq!(ops[1].account.address, "0xddeeff");
        assert_eq!(ops[2].account.address, "0x0a0b0c");
        assert_eq!(
            ops[1].metadata.as_ref().unwrap().memo.as_deref(),
            Some("AB-00-EF")
        );
    }

    #[test]
    fn missing_memo_becomes_empty_string() {
        let ops = build_operations(&TransferIntent {
            memo: None,
            ..intent()
        });
        assert_eq!(ops[1].metadata.as_ref().unwrap().memo.as_deref(), Some(""));
        assert!(ops[0].metadata.is_none());
        assert!(ops[2].metadata.is_none());
    }

    #[test]
    fn untagged_source_debits_address() {
        let ops = build_operations(&TransferIntent {
            source_tag: String::new(),
            ..intent()
        });
        assert_eq!(ops[0].account.address, "0x112233");
    }

    #[test]
    fn wire_json_of_destination_operation() {
        let ops = build_operations(&intent());
        let json = serde_json::to_value(&ops[1]).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "operation_identifier": { "index": 1 },
                "type": "DESTINATION_TRANSFER",
                "status": "SUCCESS",
                "account": { "address": "0xddeeff" },
                "amount": { "value": "10000", "currency": { "symbol": "MCM", "decimals": 9 } },
                "metadata": { "memo": "AB-00-EF" }
            })
        );
    }

    #[test]
    fn fields_feed_the_encoder() {
        let intent = intent();
        let tx = crate::encode_transaction(&intent.transaction_fields("0x99", 3)).unwrap();
        assert_eq!(tx.amount(), 10_000);
        assert_eq!(tx.fee(), 500);
        assert_eq!(tx.block_to_live(), 3);
    }
}
