//! Expired policy log repository implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for the expired-policy log
///
/// `policy_id` is `UNIQUE` in `expired_policy_log`; inserts rely on it.
#[derive(Debug, Clone)]
pub struct ExpiredPolicyLogRepository {
    pool: PgPool,
}

impl ExpiredPolicyLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns true if the policy already has a log entry
    pub async fn exists(&self, policy_id: Uuid) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM expired_policy_log WHERE policy_id = $1)",
        )
        .bind(policy_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Inserts an entry unless one already exists for the policy
    ///
    /// Returns true when a row was inserted.
    pub async fn insert_if_absent(
        &self,
        log_id: Uuid,
        policy_id: Uuid,
        logged_at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            r#"
            INSERT INTO expired_policy_log (log_id, policy_id, logged_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (policy_id) DO NOTHING
            "#,
        )
        .bind(log_id)
        .bind(policy_id)
        .bind(logged_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
