//! Building blocks of a Mochimo transfer.
//!
//! - **memo**: validates and encodes the 16-byte protocol memo field.
//! - **encoder**: serializes a transfer into the fixed 2304-byte binary record.
//! - **operations**: produces the canonical three-operation list the node expects.
//!
//! The memo is encoded twice on purpose: the operation metadata carries the
//! validated string (whose binary form is [`memo::encode`]), while the raw
//! transaction record embeds the memo as unvalidated ASCII in a 32-byte slot.
//! The two paths are independent and are kept that way.

pub mod encoder;
pub mod error;
pub mod memo;
pub mod operations;

pub use encoder::{encode_transaction, RawTransaction, TransactionFields, TX_LEN};
pub use error::{EncodeError, MemoError};
pub use operations::{build_operations, TransferIntent};
