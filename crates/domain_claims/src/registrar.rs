//! Claim registration

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, instrument};

use core_kernel::{Amount, CarId};
use domain_car::{CarPort, CarPortExt};
use domain_policy::CoverageEvaluator;

use crate::claim::{ClaimDescription, InsuranceClaim, NewClaim};
use crate::error::ClaimError;
use crate::ports::ClaimPort;

/// Validates claims against coverage and persists them
#[derive(Clone)]
pub struct ClaimRegistrar {
    cars: Arc<dyn CarPort>,
    coverage: CoverageEvaluator,
    claims: Arc<dyn ClaimPort>,
}

impl ClaimRegistrar {
    pub fn new(cars: Arc<dyn CarPort>, coverage: CoverageEvaluator, claims: Arc<dyn ClaimPort>) -> Self {
        Self { cars, coverage, claims }
    }

    /// Registers a claim for a car
    ///
    /// The car is checked first, so an unknown car is reported as
    /// `CarNotFound` before coverage is considered. Nothing is written unless
    /// both checks pass.
    ///
    /// # Errors
    ///
    /// - `ClaimError::CarNotFound` if the car does not exist
    /// - `ClaimError::InvalidInsurance` if no policy covers `claim_date`
    /// - `ClaimError::Port` if a store fails
    #[instrument(skip(self, description))]
    pub async fn register_claim(
        &self,
        car_id: CarId,
        claim_date: NaiveDate,
        description: ClaimDescription,
        amount: Amount,
    ) -> Result<InsuranceClaim, ClaimError> {
        if !self.cars.car_exists(car_id).await? {
            return Err(ClaimError::CarNotFound(car_id));
        }

        if !self
            .coverage
            .is_coverage_active(Some(car_id), Some(claim_date))
            .await?
        {
            return Err(ClaimError::InvalidInsurance { car_id, date: claim_date });
        }

        let claim = self
            .claims
            .save_claim(NewClaim {
                car_id,
                claim_date,
                description,
                amount,
            })
            .await?;

        info!(claim_id = %claim.id, "Claim registered");
        Ok(claim)
    }
}
