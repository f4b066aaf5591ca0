//! Claims domain errors

use chrono::NaiveDate;
use thiserror::Error;

use core_kernel::{CarId, CoreError, PortError};
use domain_policy::PolicyError;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Car not found with id: {0}")]
    CarNotFound(CarId),

    /// The car had no policy covering the claim date
    #[error("No active insurance policy found for car {car_id} on date: {date}")]
    InvalidInsurance { car_id: CarId, date: NaiveDate },

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error("Claim store error: {0}")]
    Port(#[from] PortError),
}

impl From<PolicyError> for ClaimError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::CarNotFound(car_id) => ClaimError::CarNotFound(car_id),
            PolicyError::Invalid(e) => ClaimError::Invalid(e),
            PolicyError::Port(e) => ClaimError::Port(e),
        }
    }
}
