//! Currency and amount types.
//!
//! Amounts travel as signed decimal strings so that values beyond the range of
//! JSON numbers survive the round trip. Locally they are parsed as `i128`,
//! which covers every `u64` transfer value and its negation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TypesError;
use crate::params::{CURRENCY_DECIMALS, CURRENCY_SYMBOL};

/// A currency descriptor (`{symbol, decimals}`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub symbol: String,
    pub decimals: u32,
}

impl Currency {
    /// The native MCM currency (9 decimals).
    pub fn mcm() -> Self {
        Self {
            symbol: CURRENCY_SYMBOL.to_string(),
            decimals: CURRENCY_DECIMALS,
        }
    }
}

/// A signed amount in the smallest unit of `currency`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

impl Amount {
    /// An MCM amount from a signed raw value.
    pub fn mcm(value: i128) -> Self {
        Self {
            value: value.to_string(),
            currency: Currency::mcm(),
        }
    }

    /// A positive MCM credit of `raw` units.
    pub fn credit(raw: u64) -> Self {
        Self::mcm(i128::from(raw))
    }

    /// A negative MCM debit of `raw` units.
    pub fn debit(raw: u64) -> Self {
        Self::mcm(-i128::from(raw))
    }

    /// Parse the wire value as a signed integer.
    pub fn as_i128(&self) -> Result<i128, TypesError> {
        self.value
            .parse::<i128>()
            .map_err(|_| TypesError::InvalidAmount(self.value.clone()))
    }

    /// Parse the wire value as an unsigned 64-bit integer (balances, fees).
    pub fn as_u64(&self) -> Result<u64, TypesError> {
        let value = self.as_i128()?;
        u64::try_from(value).map_err(|_| TypesError::AmountOutOfRange {
            value: self.value.clone(),
        })
    }

    pub fn is_mcm(&self) -> bool {
        self.currency.symbol == CURRENCY_SYMBOL
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debit_is_negated_credit() {
        assert_eq!(Amount::debit(10_000).value, "-10000");
        assert_eq!(Amount::credit(10_000).value, "10000");
        assert_eq!(Amount::debit(10_000).as_i128().unwrap(), -10_000);
    }

    #[test]
    fn max_u64_debit_does_not_overflow() {
        let amount = Amount::debit(u64::MAX);
        assert_eq!(amount.as_i128().unwrap(), -i128::from(u64::MAX));
    }

    #[test]
    fn negative_amount_is_out_of_u64_range() {
        assert!(matches!(
            Amount::debit(1).as_u64(),
            Err(TypesError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn garbage_value_is_rejected() {
        let amount = Amount {
            value: "12abc".into(),
            currency: Currency::mcm(),
        };
        assert!(matches!(amount.as_i128(), Err(TypesError::InvalidAmount(_))));
    }

    #[test]
    fn wire_shape() {
        let json = serde_json::to_value(Amount::credit(500)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "value": "500", "currency": { "symbol": "MCM", "decimals": 9 } })
        );
    }
}
