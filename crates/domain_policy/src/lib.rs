//! Insurance Policy Domain
//!
//! This crate owns insurance policies and the questions asked of them:
//!
//! - **Coverage**: does a car have at least one policy whose inclusive
//!   `[start, end]` period contains a given date?
//! - **Expiry logging**: which policies ended yesterday and have not yet been
//!   reported?
//!
//! A car may hold any number of policies. They may overlap or leave gaps;
//! coverage is simply the union of their periods.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::CoverageEvaluator;
//!
//! let evaluator = CoverageEvaluator::new(car_port, policy_port);
//! let covered = evaluator
//!     .is_coverage_active(Some(car_id), Some(date))
//!     .await?;
//! ```

pub mod policy;
pub mod coverage;
pub mod expiry;
pub mod ports;
pub mod error;

pub use policy::{InsurancePolicy, NewPolicy, ExpiredPolicyLogEntry};
pub use coverage::CoverageEvaluator;
pub use expiry::ExpiredPolicyMonitor;
pub use ports::{PolicyPort, PolicyPortExt, ExpiredPolicyLogPort};
pub use error::PolicyError;
