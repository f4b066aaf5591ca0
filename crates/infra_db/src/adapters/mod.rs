//! Domain Adapters
//!
//! PostgreSQL implementations of the domain ports. Each adapter:
//! - Implements the domain's port trait
//! - Translates between domain models and database row types
//! - Uses the repository layer for database operations
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresCarAdapter;
//! use domain_car::CarPort;
//!
//! let adapter = PostgresCarAdapter::new(pool);
//! let car = adapter.find_car(car_id).await?;
//! ```

pub mod car;
pub mod policy;
pub mod claim;
pub mod expired_policy_log;

pub use car::PostgresCarAdapter;
pub use policy::PostgresPolicyAdapter;
pub use claim::PostgresClaimAdapter;
pub use expired_policy_log::PostgresExpiredPolicyLogAdapter;

use std::time::Instant;

use core_kernel::HealthCheckResult;
use sqlx::PgPool;

/// Checks database connectivity with `SELECT 1`
pub(crate) async fn ping(pool: &PgPool, adapter_id: &str) -> HealthCheckResult {
    let start = Instant::now();

    let result = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await;

    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(_) => HealthCheckResult::healthy(adapter_id, latency_ms),
        Err(e) => HealthCheckResult::unhealthy(adapter_id, latency_ms, format!("Database error: {}", e)),
    }
}
