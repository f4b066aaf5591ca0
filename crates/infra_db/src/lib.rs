//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for the car insurance domains, built on SQLx.
//!
//! # Architecture
//!
//! ```text
//! domain port trait ◄── adapters (row ⇄ domain) ──► repositories (SQL) ──► PgPool
//! ```
//!
//! Repositories return `DatabaseError`; adapters convert it to `PortError`
//! so no SQLx type crosses into the domain crates.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig};
//! use infra_db::adapters::PostgresCarAdapter;
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/car_insurance")).await?;
//! run_migrations(&pool).await?;
//! let cars = PostgresCarAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::{
    PostgresCarAdapter, PostgresClaimAdapter, PostgresExpiredPolicyLogAdapter, PostgresPolicyAdapter,
};
