//! Test Utilities Crate
//!
//! Shared test infrastructure for the car insurance workspace.
//!
//! # Modules
//!
//! - `fixtures`: The migration seed data as domain values, and seeded mock ports
//! - `builders`: Builders backed by `fake` for cars, policies and claims
//! - `database`: PostgreSQL testcontainer with migrations applied
//! - `generators`: Proptest strategies that respect domain invariants

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
