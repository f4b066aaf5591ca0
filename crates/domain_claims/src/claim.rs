//! Insurance claim records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{Amount, CarId, ClaimId, CoreError};

/// Free-text account of a claim
///
/// Always trimmed, and between 10 and 1000 characters long after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClaimDescription(String);

impl ClaimDescription {
    pub const MIN_LENGTH: usize = 10;
    pub const MAX_LENGTH: usize = 1000;

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let length = trimmed.chars().count();

        if !(Self::MIN_LENGTH..=Self::MAX_LENGTH).contains(&length) {
            return Err(CoreError::validation(format!(
                "Description must be between {} and {} characters",
                Self::MIN_LENGTH,
                Self::MAX_LENGTH
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ClaimDescription {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ClaimDescription::parse(&value)
    }
}

impl From<ClaimDescription> for String {
    fn from(description: ClaimDescription) -> String {
        description.0
    }
}

impl fmt::Display for ClaimDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered claim; never modified after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    pub id: ClaimId,
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: ClaimDescription,
    pub amount: Amount,
}

/// A claim that passed registration checks and awaits persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: ClaimDescription,
    pub amount: Amount,
}

impl NewClaim {
    pub fn into_claim(self) -> InsuranceClaim {
        InsuranceClaim {
            id: ClaimId::new_v7(),
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_description_is_trimmed() {
        let description = ClaimDescription::parse("   Rear bumper dent   ").unwrap();
        assert_eq!(description.as_str(), "Rear bumper dent");
    }

    #[test]
    fn test_description_length_bounds() {
        assert!(ClaimDescription::parse("123456789").is_err());
        assert!(ClaimDescription::parse("1234567890").is_ok());
        assert!(ClaimDescription::parse(&"x".repeat(1000)).is_ok());
        assert!(ClaimDescription::parse(&"x".repeat(1001)).is_err());
    }

    #[test]
    fn test_padding_does_not_count() {
        assert!(ClaimDescription::parse("     short     ").is_err());
        assert!(ClaimDescription::parse("").is_err());
    }

    #[test]
    fn test_length_counts_characters() {
        // Ten two-byte characters
        assert!(ClaimDescription::parse("ăîșțâăîșțâ").is_ok());
    }

    #[test]
    fn test_description_deserialize_validates() {
        let bad: Result<ClaimDescription, _> = serde_json::from_str("\"too short\"");
        assert!(bad.is_err());
    }

    proptest! {
        #[test]
        fn prop_accepted_descriptions_are_trimmed(raw in "\\s{0,3}[a-z ]{0,40}\\s{0,3}") {
            if let Ok(description) = ClaimDescription::parse(&raw) {
                prop_assert_eq!(description.as_str(), raw.trim());
                let length = description.as_str().chars().count();
                prop_assert!((ClaimDescription::MIN_LENGTH..=ClaimDescription::MAX_LENGTH).contains(&length));
            }
        }
    }
}
