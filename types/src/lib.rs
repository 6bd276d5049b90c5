//! Fundamental types for the Mochimo construction client.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! operations, amounts, account and transaction identifiers, signing payloads,
//! the per-step construction records, and the external signer capability.

pub mod account;
pub mod amount;
pub mod construction;
pub mod error;
pub mod hash;
pub mod keys;
pub mod network;
pub mod operation;
pub mod params;

pub use account::{normalize_hex, strip_hex_prefix, AccountIdentifier};
pub use amount::{Amount, Currency};
pub use construction::{ConstructionMetadata, PreprocessMetadata, PreprocessOptions};
pub use error::TypesError;
pub use hash::{BlockIdentifier, TransactionIdentifier};
pub use keys::{PublicKey, Signature, SignatureType, SignerError, SigningPayload, WalletKeys};
pub use network::NetworkIdentifier;
pub use operation::{Operation, OperationIdentifier, OperationMetadata, OperationStatus, OperationType};
