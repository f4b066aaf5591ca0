//! Pre-built Test Fixtures
//!
//! The seed data shipped in `migrations/` mirrored as domain values, plus
//! in-memory ports pre-loaded with it. Tests that run against the mocks and
//! tests that run against PostgreSQL can therefore assert the same facts.

use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use uuid::Uuid;

use core_kernel::{CarId, DateRange, OwnerId, PolicyId};
use domain_car::ports::mock::MockCarPort;
use domain_car::{Car, Owner, Vin};
use domain_claims::ports::mock::MockClaimPort;
use domain_policy::ports::mock::{MockExpiredPolicyLogPort, MockPolicyPort};
use domain_policy::InsurancePolicy;

fn seed_uuid(suffix: u64) -> Uuid {
    Uuid::from_u128(0x0190a1b2_0000_7000_8000_000000000000 | suffix as u128)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}

/// Identifiers and dates of the seed data
pub struct SeedIds;

impl SeedIds {
    /// Dacia Logan insured by Allianz in 2024 and Groupama in 2025
    pub fn logan() -> CarId {
        CarId::from_uuid(seed_uuid(0x101))
    }

    /// VW Golf insured by Allianz from March to September 2025
    pub fn golf() -> CarId {
        CarId::from_uuid(seed_uuid(0x102))
    }

    pub fn logan_allianz_2024() -> PolicyId {
        PolicyId::from_uuid(seed_uuid(0x201))
    }

    pub fn logan_groupama_2025() -> PolicyId {
        PolicyId::from_uuid(seed_uuid(0x202))
    }

    pub fn golf_allianz_2025() -> PolicyId {
        PolicyId::from_uuid(seed_uuid(0x203))
    }
}

/// The seeded cars and policies
pub struct SeedData {
    pub cars: Vec<Car>,
    pub policies: Vec<InsurancePolicy>,
}

/// Seed data, built once per test binary
pub static SEED: Lazy<SeedData> = Lazy::new(|| SeedData {
    cars: vec![
        Car {
            id: SeedIds::logan(),
            vin: Vin::parse("UU1HSDADG52112345").expect("valid seed VIN"),
            make: "Dacia".to_string(),
            model: "Logan".to_string(),
            year_of_manufacture: 2018,
            owner: Some(Owner {
                id: OwnerId::from_uuid(seed_uuid(0x001)),
                name: "Ana Pop".to_string(),
                email: Some("ana.pop@example.com".to_string()),
            }),
        },
        Car {
            id: SeedIds::golf(),
            vin: Vin::parse("WVWZZZ1KZ7W123456").expect("valid seed VIN"),
            make: "VW".to_string(),
            model: "Golf".to_string(),
            year_of_manufacture: 2021,
            owner: Some(Owner {
                id: OwnerId::from_uuid(seed_uuid(0x002)),
                name: "Bogdan Ionescu".to_string(),
                email: Some("bogdan.ionescu@example.com".to_string()),
            }),
        },
    ],
    policies: vec![
        seed_policy(SeedIds::logan_allianz_2024(), SeedIds::logan(), "Allianz", date(2024, 1, 1), date(2024, 12, 31)),
        seed_policy(SeedIds::logan_groupama_2025(), SeedIds::logan(), "Groupama", date(2025, 1, 1), date(2025, 12, 31)),
        seed_policy(SeedIds::golf_allianz_2025(), SeedIds::golf(), "Allianz", date(2025, 3, 1), date(2025, 9, 30)),
    ],
});

fn seed_policy(
    id: PolicyId,
    car_id: CarId,
    provider: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> InsurancePolicy {
    InsurancePolicy {
        id,
        car_id,
        provider: provider.to_string(),
        period: DateRange::new(start, end).expect("valid seed period"),
    }
}

/// Mock ports; clones share state with the `Arc`s handed to services
#[derive(Debug, Clone, Default)]
pub struct MockPorts {
    pub cars: MockCarPort,
    pub policies: MockPolicyPort,
    pub claims: MockClaimPort,
    pub expired_policy_log: MockExpiredPolicyLogPort,
}

impl MockPorts {
    /// Empty ports
    pub fn empty() -> Self {
        Self::default()
    }

    /// Ports loaded with the seed data
    pub async fn seeded() -> Self {
        Self {
            cars: MockCarPort::with_cars(SEED.cars.clone()).await,
            policies: MockPolicyPort::with_policies(SEED.policies.clone()).await,
            claims: MockClaimPort::new(),
            expired_policy_log: MockExpiredPolicyLogPort::new(),
        }
    }

    pub fn car_port(&self) -> Arc<MockCarPort> {
        Arc::new(self.cars.clone())
    }

    pub fn policy_port(&self) -> Arc<MockPolicyPort> {
        Arc::new(self.policies.clone())
    }

    pub fn claim_port(&self) -> Arc<MockClaimPort> {
        Arc::new(self.claims.clone())
    }

    pub fn expired_policy_log_port(&self) -> Arc<MockExpiredPolicyLogPort> {
        Arc::new(self.expired_policy_log.clone())
    }
}
