//! Core Kernel - Foundational types shared by the car insurance domains
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers for cars, owners, policies and claims
//! - Inclusive calendar date ranges and timezone-aware "today"
//! - Strictly positive monetary amounts with precise decimal arithmetic
//! - Port abstractions implemented by storage adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Amount, MoneyError};
pub use temporal::{DateRange, TemporalError, Timezone};
pub use identifiers::{CarId, OwnerId, PolicyId, ClaimId, ExpiredPolicyLogId};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::CoreError;
