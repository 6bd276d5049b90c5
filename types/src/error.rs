//! Error type for parsing and validating wire values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid amount value: {0}")]
    InvalidAmount(String),

    #[error("amount {value} does not fit the expected range")]
    AmountOutOfRange { value: String },
}
