//! Coverage evaluation
//!
//! Answers whether a car is insured on a given calendar day.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use core_kernel::CarId;
use domain_car::{CarPort, CarPortExt};

use crate::error::PolicyError;
use crate::ports::{PolicyPort, PolicyPortExt};

/// Determines active-coverage status for a car on a date
#[derive(Clone)]
pub struct CoverageEvaluator {
    cars: Arc<dyn CarPort>,
    policies: Arc<dyn PolicyPort>,
}

impl CoverageEvaluator {
    pub fn new(cars: Arc<dyn CarPort>, policies: Arc<dyn PolicyPort>) -> Self {
        Self { cars, policies }
    }

    /// Returns true if at least one policy of the car covers `date`
    ///
    /// An absent car id or date yields `Ok(false)` rather than an error, so
    /// callers holding partial input get a plain "not covered".
    ///
    /// # Errors
    ///
    /// Returns `PolicyError::CarNotFound` when the car does not exist.
    #[instrument(skip(self))]
    pub async fn is_coverage_active(
        &self,
        car_id: Option<CarId>,
        date: Option<NaiveDate>,
    ) -> Result<bool, PolicyError> {
        let (Some(car_id), Some(date)) = (car_id, date) else {
            return Ok(false);
        };

        if !self.cars.car_exists(car_id).await? {
            return Err(PolicyError::CarNotFound(car_id));
        }

        let covering = self.policies.find_covering(car_id, date).await?;
        let active = !covering.is_empty();

        debug!(covering = covering.len(), active, "Coverage evaluated");
        Ok(active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::NewPolicy;
    use crate::ports::mock::MockPolicyPort;
    use domain_car::ports::mock::MockCarPort;
    use domain_car::{Car, NewCar};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn car() -> Car {
        NewCar::new("VF1RFB00X12345678", "Renault", "Clio", 2020, None)
            .unwrap()
            .into_car()
    }

    async fn evaluator_with(car: &Car, periods: &[(NaiveDate, NaiveDate)]) -> CoverageEvaluator {
        let cars = MockCarPort::with_cars(vec![car.clone()]).await;
        let policies = MockPolicyPort::new();
        for (start, end) in periods {
            policies
                .save_policy(NewPolicy::new(car.id, "Allianz", *start, *end).unwrap())
                .await
                .unwrap();
        }
        CoverageEvaluator::new(Arc::new(cars), Arc::new(policies))
    }

    #[tokio::test]
    async fn test_absent_inputs_are_not_covered() {
        let car = car();
        let evaluator = evaluator_with(&car, &[(date(2024, 1, 1), date(2024, 12, 31))]).await;

        assert!(!evaluator.is_coverage_active(None, Some(date(2024, 6, 1))).await.unwrap());
        assert!(!evaluator.is_coverage_active(Some(car.id), None).await.unwrap());
        assert!(!evaluator.is_coverage_active(None, None).await.unwrap());
        assert!(!evaluator.is_coverage_active(Some(CarId::new()), None).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_car() {
        let car = car();
        let evaluator = evaluator_with(&car, &[]).await;
        let missing = CarId::new();

        let err = evaluator
            .is_coverage_active(Some(missing), Some(date(2024, 6, 1)))
            .await
            .unwrap_err();
        assert!(matches!(err, PolicyError::CarNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn test_inclusive_boundaries() {
        let car = car();
        let evaluator = evaluator_with(&car, &[(date(2024, 1, 1), date(2024, 12, 31))]).await;

        for (day, expected) in [
            (date(2024, 1, 1), true),
            (date(2024, 6, 15), true),
            (date(2024, 12, 31), true),
            (date(2023, 12, 31), false),
            (date(2025, 1, 1), false),
        ] {
            let active = evaluator.is_coverage_active(Some(car.id), Some(day)).await.unwrap();
            assert_eq!(active, expected, "coverage on {}", day);
        }
    }

    #[tokio::test]
    async fn test_gap_between_policies() {
        let car = car();
        let evaluator = evaluator_with(
            &car,
            &[
                (date(2023, 1, 1), date(2023, 6, 30)),
                (date(2023, 8, 1), date(2023, 12, 31)),
            ],
        )
        .await;

        assert!(evaluator.is_coverage_active(Some(car.id), Some(date(2023, 6, 30))).await.unwrap());
        assert!(!evaluator.is_coverage_active(Some(car.id), Some(date(2023, 7, 15))).await.unwrap());
        assert!(evaluator.is_coverage_active(Some(car.id), Some(date(2023, 8, 1))).await.unwrap());
    }

    #[tokio::test]
    async fn test_car_without_policies() {
        let car = car();
        let evaluator = evaluator_with(&car, &[]).await;

        assert!(!evaluator.is_coverage_active(Some(car.id), Some(date(2024, 6, 1))).await.unwrap());
    }
}
