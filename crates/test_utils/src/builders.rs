//! Test Data Builders
//!
//! Builders fill every field with realistic fake data so tests only spell
//! out what they assert on.

use chrono::{Duration, NaiveDate};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;

use core_kernel::{Amount, CarId};
use domain_car::{Car, NewCar, Owner};
use domain_claims::{ClaimDescription, InsuranceClaim, NewClaim};
use domain_policy::{InsurancePolicy, NewPolicy};

/// Characters allowed in a VIN
const VIN_ALPHABET: &[u8] = b"0123456789ABCDEFGHJKLMNPRSTUVWXYZ";

const MAKES: &[(&str, &str)] = &[
    ("Dacia", "Logan"),
    ("Dacia", "Duster"),
    ("Volkswagen", "Golf"),
    ("Skoda", "Octavia"),
    ("Renault", "Clio"),
    ("Toyota", "Corolla"),
];

/// Generates a random well-formed VIN
pub fn fake_vin() -> String {
    (0..17)
        .map(|_| VIN_ALPHABET[(0..VIN_ALPHABET.len()).fake::<usize>()] as char)
        .collect()
}

/// Builder for cars
pub struct CarBuilder {
    vin: String,
    make: String,
    model: String,
    year_of_manufacture: i32,
    owner: Option<Owner>,
}

impl Default for CarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CarBuilder {
    pub fn new() -> Self {
        let (make, model) = MAKES[(0..MAKES.len()).fake::<usize>()];
        Self {
            vin: fake_vin(),
            make: make.to_string(),
            model: model.to_string(),
            year_of_manufacture: (1995..2025).fake::<i32>(),
            owner: Some(Owner::new(Name().fake::<String>(), Some(SafeEmail().fake()))),
        }
    }

    pub fn with_vin(mut self, vin: impl Into<String>) -> Self {
        self.vin = vin.into();
        self
    }

    pub fn with_make_model(mut self, make: impl Into<String>, model: impl Into<String>) -> Self {
        self.make = make.into();
        self.model = model.into();
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year_of_manufacture = year;
        self
    }

    pub fn without_owner(mut self) -> Self {
        self.owner = None;
        self
    }

    /// Builds registration data
    ///
    /// # Panics
    ///
    /// Panics if an override made the data invalid
    pub fn build_new(self) -> NewCar {
        NewCar::new(
            &self.vin,
            self.make,
            self.model,
            self.year_of_manufacture,
            self.owner,
        )
        .expect("CarBuilder produced an invalid car")
    }

    /// Builds a car with a fresh id
    pub fn build(self) -> Car {
        self.build_new().into_car()
    }
}

/// Builder for policies
pub struct PolicyBuilder {
    car_id: CarId,
    provider: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl PolicyBuilder {
    /// A one-year policy starting 2024-01-01
    pub fn for_car(car_id: CarId) -> Self {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
        Self {
            car_id,
            provider: CompanyName().fake(),
            start,
            end: start + Duration::days(365),
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Sets the inclusive period
    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    /// Makes the policy end on `end`, keeping its length
    pub fn ending_on(mut self, end: NaiveDate) -> Self {
        self.start = end - (self.end - self.start);
        self.end = end;
        self
    }

    pub fn build_new(self) -> NewPolicy {
        NewPolicy::new(self.car_id, self.provider, self.start, self.end)
            .expect("PolicyBuilder produced an invalid policy")
    }

    pub fn build(self) -> InsurancePolicy {
        self.build_new().into_policy()
    }
}

/// Builder for claims
pub struct ClaimBuilder {
    car_id: CarId,
    claim_date: NaiveDate,
    description: String,
    amount: Decimal,
}

impl ClaimBuilder {
    pub fn for_car(car_id: CarId) -> Self {
        Self {
            car_id,
            claim_date: NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date"),
            description: Sentence(4..10).fake(),
            amount: Decimal::new((1_000..500_000).fake::<i64>(), 2),
        }
    }

    pub fn on(mut self, claim_date: NaiveDate) -> Self {
        self.claim_date = claim_date;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn build_new(self) -> NewClaim {
        NewClaim {
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: ClaimDescription::parse(&self.description)
                .expect("ClaimBuilder produced an invalid description"),
            amount: Amount::new(self.amount).expect("ClaimBuilder produced an invalid amount"),
        }
    }

    pub fn build(self) -> InsuranceClaim {
        self.build_new().into_claim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_car::Vin;

    #[test]
    fn test_fake_vins_are_valid() {
        for _ in 0..100 {
            assert!(Vin::parse(&fake_vin()).is_ok());
        }
    }

    #[test]
    fn test_defaults_build() {
        let car = CarBuilder::new().build();
        let policy = PolicyBuilder::for_car(car.id).build();
        let claim = ClaimBuilder::for_car(car.id).build();

        assert!(policy.covers(claim.claim_date));
        assert!(claim.amount.value() > Decimal::ZERO);
    }

    #[test]
    fn test_ending_on_keeps_length() {
        let end = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
        let policy = PolicyBuilder::for_car(CarId::new()).ending_on(end).build();

        assert_eq!(policy.end_date(), end);
        assert_eq!((policy.end_date() - policy.start_date()).num_days(), 365);
    }
}
