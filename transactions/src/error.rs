use thiserror::Error;

/// Why a memo was rejected by [`crate::memo::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoError {
    #[error("memo contains invalid character {0:?}")]
    InvalidCharacter(char),

    #[error("memo must not start with '-'")]
    LeadingDash,

    #[error("memo must not end with '-'")]
    TrailingDash,

    #[error("memo group {position} is empty")]
    EmptyGroup { position: usize },

    #[error("memo group {group:?} mixes letters and digits")]
    MixedGroup { group: String },

    #[error("memo group {position} has the same kind as the group before it")]
    AdjacentGroups { position: usize },
}

/// Failure while filling the binary transaction record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{field} is not valid hex: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("{field} is {len} bytes, slot holds {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
}
