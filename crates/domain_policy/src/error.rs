//! Policy domain errors

use thiserror::Error;

use core_kernel::{CarId, CoreError, PortError};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The car being asked about does not exist
    #[error("Car not found with id: {0}")]
    CarNotFound(CarId),

    /// Policy data failed validation
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// A store failed
    #[error("Policy store error: {0}")]
    Port(#[from] PortError),
}

impl PolicyError {
    /// Creates a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        PolicyError::Invalid(CoreError::validation(message))
    }
}
