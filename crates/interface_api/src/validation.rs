//! Request value validation
//!
//! Dates arrive as strings in query parameters and request bodies. They must
//! be exactly `YYYY-MM-DD` and fall within the configured window.

use chrono::{Months, NaiveDate};
use thiserror::Error;
use validator::ValidationError;

use core_kernel::Timezone;
use domain_claims::ClaimDescription;

use crate::config::ApiConfig;

/// Date parsing failures at the HTTP boundary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateValidationError {
    #[error("Date is required")]
    Missing,

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidFormat,

    #[error("Date must be between {min} and {max}")]
    OutOfRange { min: NaiveDate, max: NaiveDate },
}

/// Parses and range-checks request dates
#[derive(Debug, Clone)]
pub struct DateValidator {
    min: NaiveDate,
    max_years_ahead: u32,
    timezone: Timezone,
}

impl DateValidator {
    pub fn new(min: NaiveDate, max_years_ahead: u32, timezone: Timezone) -> Self {
        Self {
            min,
            max_years_ahead,
            timezone,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.min_claim_date, config.max_years_ahead, config.timezone)
    }

    /// Validates against today's date in the configured timezone
    pub fn validate_and_parse(&self, raw: Option<&str>) -> Result<NaiveDate, DateValidationError> {
        self.validate_and_parse_as_of(raw, self.timezone.today())
    }

    /// Validates with the upper bound computed from `today`
    pub fn validate_and_parse_as_of(
        &self,
        raw: Option<&str>,
        today: NaiveDate,
    ) -> Result<NaiveDate, DateValidationError> {
        let raw = match raw {
            Some(s) if !s.trim().is_empty() => s,
            _ => return Err(DateValidationError::Missing),
        };

        let date = parse_iso_date(raw).ok_or(DateValidationError::InvalidFormat)?;

        let max = self.max_date(today);
        if date < self.min || date > max {
            return Err(DateValidationError::OutOfRange { min: self.min, max });
        }

        Ok(date)
    }

    fn max_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_months(Months::new(self.max_years_ahead.saturating_mul(12)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Parses strict `YYYY-MM-DD`
///
/// chrono's `%m` and `%d` accept single digits, so the shape is checked first.
fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });

    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// `validator` hook for claim descriptions
pub fn validate_claim_description(value: &str) -> Result<(), ValidationError> {
    ClaimDescription::parse(value).map(|_| ()).map_err(|_| {
        let mut error = ValidationError::new("description_length");
        error.message = Some(
            format!(
                "Description must be between {} and {} characters",
                ClaimDescription::MIN_LENGTH,
                ClaimDescription::MAX_LENGTH
            )
            .into(),
        );
        error
    })
}

/// Longest owner name accepted, counted after trimming
pub const OWNER_NAME_MAX_LENGTH: usize = 200;

/// `validator` hook for owner names
///
/// Surrounding whitespace does not count, so a blank name is rejected.
pub fn validate_owner_name(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if (1..=OWNER_NAME_MAX_LENGTH).contains(&len) {
        return Ok(());
    }

    let mut error = ValidationError::new("owner_name_length");
    error.message = Some(
        format!("Owner name must be between 1 and {} characters", OWNER_NAME_MAX_LENGTH).into(),
    );
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn validator() -> DateValidator {
        DateValidator::new(date(1900, 1, 1), 50, Timezone::default())
    }

    #[test]
    fn test_valid_date() {
        assert_eq!(validator().validate_and_parse(Some("2024-06-15")), Ok(date(2024, 6, 15)));
    }

    #[test]
    fn test_missing_or_blank() {
        let v = validator();
        assert_eq!(v.validate_and_parse(None), Err(DateValidationError::Missing));
        assert_eq!(v.validate_and_parse(Some("")), Err(DateValidationError::Missing));
        assert_eq!(v.validate_and_parse(Some("   ")), Err(DateValidationError::Missing));
    }

    #[test]
    fn test_malformed_dates() {
        let v = validator();
        for raw in ["2024-6-15", "2024/06/15", "06/15/2024", "15-06-2024", "not-a-date", "2024-02-30", " 2024-06-15"] {
            assert_eq!(
                v.validate_and_parse(Some(raw)),
                Err(DateValidationError::InvalidFormat),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_range_bounds() {
        let v = validator();
        let today = date(2025, 3, 10);

        assert_eq!(v.validate_and_parse_as_of(Some("1900-01-01"), today), Ok(date(1900, 1, 1)));
        assert!(matches!(
            v.validate_and_parse_as_of(Some("1899-12-31"), today),
            Err(DateValidationError::OutOfRange { .. })
        ));
        assert_eq!(v.validate_and_parse_as_of(Some("2075-03-10"), today), Ok(date(2075, 3, 10)));
        assert_eq!(
            v.validate_and_parse_as_of(Some("2075-03-11"), today),
            Err(DateValidationError::OutOfRange {
                min: date(1900, 1, 1),
                max: date(2075, 3, 10),
            })
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = DateValidationError::OutOfRange {
            min: date(1900, 1, 1),
            max: date(2075, 3, 10),
        };
        assert_eq!(err.to_string(), "Date must be between 1900-01-01 and 2075-03-10");
    }

    #[test]
    fn test_description_hook() {
        assert!(validate_claim_description("  fender bender on exit  ").is_ok());
        let err = validate_claim_description("   short   ").unwrap_err();
        assert_eq!(err.code, "description_length");
    }

    #[test]
    fn test_owner_name_hook() {
        assert!(validate_owner_name("  Ana Pop ").is_ok());
        assert_eq!(validate_owner_name("   ").unwrap_err().code, "owner_name_length");
        assert!(validate_owner_name("").is_err());

        let padded = format!("  {}  ", "a".repeat(OWNER_NAME_MAX_LENGTH));
        assert!(validate_owner_name(&padded).is_ok());
        assert!(validate_owner_name(&"a".repeat(OWNER_NAME_MAX_LENGTH + 1)).is_err());
    }

    mod property_tests {
        use super::*;
        use chrono::Duration;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn formatted_dates_in_range_are_accepted(offset in 0i64..60_000) {
                let v = validator();
                let today = date(2025, 3, 10);
                let day = date(1900, 1, 1) + Duration::days(offset);
                let raw = day.format("%Y-%m-%d").to_string();

                prop_assert_eq!(v.validate_and_parse_as_of(Some(&raw), today), Ok(day));
            }
        }
    }
}
