//! Car aggregate and its value objects

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use core_kernel::{CarId, CoreError, OwnerId};

/// The first production automobile year
const FIRST_MODEL_YEAR: i32 = 1886;

/// Vehicle Identification Number
///
/// Stored upper-cased. A VIN is 17 characters from `0-9A-Z` excluding the
/// letters I, O and Q.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vin(String);

impl Vin {
    pub const LENGTH: usize = 17;

    /// Normalizes and validates a VIN
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalized = raw.trim().to_ascii_uppercase();

        if normalized.chars().count() != Self::LENGTH {
            return Err(CoreError::validation(format!(
                "VIN must be {} characters, got {}",
                Self::LENGTH,
                normalized.chars().count()
            )));
        }

        if let Some(bad) = normalized
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() || matches!(c, 'I' | 'O' | 'Q'))
        {
            return Err(CoreError::validation(format!(
                "VIN contains invalid character '{}'",
                bad
            )));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Vin {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Vin::parse(&value)
    }
}

impl From<Vin> for String {
    fn from(vin: Vin) -> String {
        vin.0
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A car owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: OwnerId,
    pub name: String,
    pub email: Option<String>,
}

impl Owner {
    pub fn new(name: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: OwnerId::new_v7(),
            name: name.into(),
            email,
        }
    }
}

/// A registered car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Unique identifier
    pub id: CarId,
    /// VIN, unique across all cars
    pub vin: Vin,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    /// Current owner, if known
    pub owner: Option<Owner>,
}

/// Validated data for registering a new car
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCar {
    pub vin: Vin,
    pub make: String,
    pub model: String,
    pub year_of_manufacture: i32,
    pub owner: Option<Owner>,
}

impl NewCar {
    /// Validates registration data
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the VIN is malformed, make or model
    /// is blank, or the year is outside `1886..=next year`.
    pub fn new(
        vin: &str,
        make: impl Into<String>,
        model: impl Into<String>,
        year_of_manufacture: i32,
        owner: Option<Owner>,
    ) -> Result<Self, CoreError> {
        let vin = Vin::parse(vin)?;
        let make = make.into().trim().to_string();
        let model = model.into().trim().to_string();

        if make.is_empty() {
            return Err(CoreError::validation("Make is required"));
        }
        if model.is_empty() {
            return Err(CoreError::validation("Model is required"));
        }

        let latest_model_year = Utc::now().year() + 1;
        if !(FIRST_MODEL_YEAR..=latest_model_year).contains(&year_of_manufacture) {
            return Err(CoreError::validation(format!(
                "Year of manufacture must be between {} and {}",
                FIRST_MODEL_YEAR, latest_model_year
            )));
        }

        Ok(Self {
            vin,
            make,
            model,
            year_of_manufacture,
            owner,
        })
    }

    /// Materializes the car with a freshly assigned identifier
    pub fn into_car(self) -> Car {
        Car {
            id: CarId::new_v7(),
            vin: self.vin,
            make: self.make,
            model: self.model,
            year_of_manufacture: self.year_of_manufacture,
            owner: self.owner,
        }
    }
}
