use thiserror::Error;

use mochimo_rpc::RpcError;
use mochimo_transactions::{EncodeError, MemoError};
use mochimo_types::SignerError;

use crate::construction::ConstructionStep;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("node RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("transaction encoding error: {0}")]
    Encode(#[from] EncodeError),

    #[error("invalid memo: {0}")]
    Memo(#[from] MemoError),

    #[error("signing error: {0}")]
    Signing(#[from] SignerError),

    #[error("construction step out of order: expected {expected}, flow is at {actual}")]
    OutOfOrder {
        expected: ConstructionStep,
        actual: ConstructionStep,
    },

    #[error("expected exactly one signing payload, node returned {count}")]
    UnexpectedPayloadCount { count: usize },

    #[error("unsigned transaction is not valid hex: {0}")]
    InvalidUnsignedTransaction(String),

    #[error("parsed transaction does not match the built operations: {0}")]
    ParseMismatch(String),

    #[error("transaction {hash} not seen in mempool after {elapsed_ms}ms ({attempts} attempts)")]
    MonitorTimeout {
        hash: String,
        elapsed_ms: u64,
        attempts: u32,
    },

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u64 },

    #[error("invalid balance reported by node: {0}")]
    InvalidBalance(String),

    #[error("config error: {0}")]
    Config(String),
}

impl WalletError {
    /// Whether this error is the mempool monitor giving up.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::MonitorTimeout { .. })
    }
}
