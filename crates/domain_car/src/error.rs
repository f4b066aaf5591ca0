//! Car domain errors

use thiserror::Error;

use core_kernel::{CarId, CoreError, PortError};

/// Errors that can occur in the car domain
#[derive(Debug, Error)]
pub enum CarError {
    /// No car exists with the given identifier
    #[error("Car not found with id: {0}")]
    CarNotFound(CarId),

    /// Another car is already registered with this VIN
    #[error("VIN already exists: {0}")]
    DuplicateVin(String),

    /// Registration data failed validation
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The car store failed
    #[error("Car store error: {0}")]
    Port(#[from] PortError),
}
