//! Car Registry Domain
//!
//! This crate owns the car aggregate: identity, VIN uniqueness and the
//! optional owner reference. Policies and claims live in their own crates and
//! refer to cars only by `CarId`.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_car::{CarRegistry, NewCar};
//!
//! let registry = CarRegistry::new(car_port);
//! let car = registry
//!     .register_car(NewCar::new("1HGCM82633A004352", "Honda", "Accord", 2018, None)?)
//!     .await?;
//! ```

pub mod car;
pub mod error;
pub mod ports;
pub mod services;

pub use car::{Car, NewCar, Owner, Vin};
pub use error::CarError;
pub use ports::{CarPort, CarPortExt};
pub use services::CarRegistry;
