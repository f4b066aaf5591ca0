//! Repository implementations for domain entities
//!
//! Repositories own the SQL. They speak in database row types and
//! `DatabaseError`; translation to domain types happens in the adapters.
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow`, so the
//! crate compiles without a live database.

pub mod car;
pub mod policy;
pub mod claim;
pub mod expired_policy_log;

pub use car::CarRepository;
pub use policy::PolicyRepository;
pub use claim::ClaimRepository;
pub use expired_policy_log::ExpiredPolicyLogRepository;
