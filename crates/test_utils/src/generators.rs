//! Property-Based Test Generators
//!
//! Proptest strategies producing values that already satisfy the domain
//! invariants: positive amounts, start <= end, descriptions of legal length.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{Amount, CarId, DateRange, PolicyId};
use domain_claims::{ClaimDescription, InsuranceClaim, NewClaim};
use domain_policy::InsurancePolicy;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date")
}

/// Dates between 2020-01-01 and roughly 2030
pub fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3650).prop_map(|days| epoch() + Duration::days(days))
}

/// Inclusive periods between one day and two years long
pub fn date_range_strategy() -> impl Strategy<Value = DateRange> {
    (date_strategy(), 0i64..730).prop_map(|(start, len)| {
        DateRange::new(start, start + Duration::days(len)).expect("start <= end")
    })
}

/// Strictly positive amounts with up to two decimal places
pub fn amount_strategy() -> impl Strategy<Value = Amount> {
    (1i64..100_000_000, 0u32..=2)
        .prop_map(|(mantissa, scale)| Amount::new(Decimal::new(mantissa, scale)).expect("positive"))
}

/// Descriptions whose trimmed length is within bounds
pub fn description_strategy() -> impl Strategy<Value = ClaimDescription> {
    "[A-Za-z][A-Za-z ,.]{8,200}[A-Za-z.]"
        .prop_map(|raw| ClaimDescription::parse(&raw).expect("legal description"))
}

pub fn provider_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Allianz".to_string()),
        Just("Groupama".to_string()),
        Just("Omniasig".to_string()),
        Just("Generali".to_string()),
        Just("Uniqa".to_string()),
    ]
}

/// Policies of one car
pub fn policy_strategy(car_id: CarId) -> impl Strategy<Value = InsurancePolicy> {
    (any::<u128>(), provider_strategy(), date_range_strategy()).prop_map(
        move |(id, provider, period)| InsurancePolicy {
            id: PolicyId::from_uuid(uuid::Uuid::from_u128(id)),
            car_id,
            provider,
            period,
        },
    )
}

/// Claims of one car, on any date in the generated window
pub fn claim_strategy(car_id: CarId) -> impl Strategy<Value = InsuranceClaim> {
    (date_strategy(), description_strategy(), amount_strategy()).prop_map(
        move |(claim_date, description, amount)| {
            NewClaim {
                car_id,
                claim_date,
                description,
                amount,
            }
            .into_claim()
        },
    )
}
