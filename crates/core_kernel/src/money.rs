//! Monetary amounts with precise decimal arithmetic
//!
//! Claim amounts use rust_decimal so that "1500.00" is stored and returned
//! exactly, without floating-point drift.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when constructing an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount format: {0}")]
    InvalidFormat(String),

    #[error("Amount must be positive, got {0}")]
    NotPositive(Decimal),
}

/// A strictly positive monetary amount
///
/// The invariant `amount > 0` holds for every constructed value, including
/// values produced by deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl Amount {
    /// Creates an amount, rejecting zero and negative values
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value <= Decimal::ZERO {
            return Err(MoneyError::NotPositive(value));
        }
        Ok(Self(value))
    }

    /// Returns the decimal value
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Amount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|_| MoneyError::InvalidFormat(s.to_string()))?;
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Decimal {
        amount.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_creation() {
        let amount = Amount::new(dec!(1500.00)).unwrap();
        assert_eq!(amount.value(), dec!(1500.00));
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert_eq!(Amount::new(dec!(0)), Err(MoneyError::NotPositive(dec!(0))));
        assert!(Amount::new(dec!(-0.01)).is_err());
    }

    #[test]
    fn test_parse_keeps_scale() {
        let amount: Amount = "123.45".parse().unwrap();
        assert_eq!(amount.value(), dec!(123.45));
        assert_eq!(amount.to_string(), "123.45");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("12,5".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
        assert!(matches!("abc".parse::<Amount>(), Err(MoneyError::InvalidFormat(_))));
        assert!(matches!("-3".parse::<Amount>(), Err(MoneyError::NotPositive(_))));
    }

    #[test]
    fn test_deserialize_enforces_positive() {
        let ok: Result<Amount, _> = serde_json::from_str("\"10.50\"");
        assert!(ok.is_ok());

        let zero: Result<Amount, _> = serde_json::from_str("\"0\"");
        assert!(zero.is_err());
    }
}
