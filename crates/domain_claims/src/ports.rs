//! Claims Domain Ports

use async_trait::async_trait;

use core_kernel::{CarId, DomainPort, HealthCheckable, PortError};

use crate::claim::{InsuranceClaim, NewClaim};

/// The port trait for claim storage
#[async_trait]
pub trait ClaimPort: DomainPort + HealthCheckable {
    /// Returns every claim of a car, ordered by claim date ascending
    async fn find_by_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError>;

    /// Persists a new claim in a single insert
    async fn save_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError>;
}

/// Mock implementation of ClaimPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    #[derive(Debug, Default, Clone)]
    pub struct MockClaimPort {
        claims: Arc<RwLock<Vec<InsuranceClaim>>>,
    }

    impl MockClaimPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with claims for testing
        pub async fn with_claims(claims: Vec<InsuranceClaim>) -> Self {
            let port = Self::new();
            port.claims.write().await.extend(claims);
            port
        }

        /// Number of stored claims across all cars
        pub async fn count(&self) -> usize {
            self.claims.read().await.len()
        }
    }

    impl DomainPort for MockClaimPort {}

    #[async_trait]
    impl HealthCheckable for MockClaimPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-claim-port", 0)
        }
    }

    #[async_trait]
    impl ClaimPort for MockClaimPort {
        async fn find_by_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
            let mut claims: Vec<_> = self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| c.car_id == car_id)
                .cloned()
                .collect();
            claims.sort_by_key(|c| c.claim_date);
            Ok(claims)
        }

        async fn save_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
            let claim = claim.into_claim();
            self.claims.write().await.push(claim.clone());
            Ok(claim)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockClaimPort;
    use crate::claim::ClaimDescription;
    use chrono::NaiveDate;
    use core_kernel::Amount;
    use rust_decimal_macros::dec;

    fn new_claim(car_id: CarId, day: u32) -> NewClaim {
        NewClaim {
            car_id,
            claim_date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            description: ClaimDescription::parse("Cracked windshield").unwrap(),
            amount: Amount::new(dec!(250.00)).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_find_by_car_is_date_ordered() {
        let port = MockClaimPort::new();
        let car = CarId::new();

        port.save_claim(new_claim(car, 20)).await.unwrap();
        port.save_claim(new_claim(car, 3)).await.unwrap();
        port.save_claim(new_claim(CarId::new(), 1)).await.unwrap();
        port.save_claim(new_claim(car, 11)).await.unwrap();

        let days: Vec<_> = port
            .find_by_car(car)
            .await
            .unwrap()
            .iter()
            .map(|c| c.claim_date.format("%d").to_string())
            .collect();
        assert_eq!(days, vec!["03", "11", "20"]);
        assert_eq!(port.count().await, 4);
    }
}
