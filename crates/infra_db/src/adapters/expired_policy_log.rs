//! PostgreSQL Expired Policy Log Adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{DomainPort, ExpiredPolicyLogId, HealthCheckResult, HealthCheckable, PolicyId, PortError};
use domain_policy::ExpiredPolicyLogPort;

use crate::repositories::expired_policy_log::ExpiredPolicyLogRepository;

/// PostgreSQL-backed implementation of the ExpiredPolicyLogPort trait
#[derive(Debug, Clone)]
pub struct PostgresExpiredPolicyLogAdapter {
    repository: ExpiredPolicyLogRepository,
    pool: PgPool,
}

impl PostgresExpiredPolicyLogAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ExpiredPolicyLogRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresExpiredPolicyLogAdapter {}

#[async_trait]
impl HealthCheckable for PostgresExpiredPolicyLogAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-expired-policy-log-adapter").await
    }
}

#[async_trait]
impl ExpiredPolicyLogPort for PostgresExpiredPolicyLogAdapter {
    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn is_logged(&self, policy_id: PolicyId) -> Result<bool, PortError> {
        Ok(self.repository.exists(*policy_id.as_uuid()).await?)
    }

    #[instrument(skip(self), fields(policy_id = %policy_id))]
    async fn record(&self, policy_id: PolicyId, logged_at: DateTime<Utc>) -> Result<bool, PortError> {
        let inserted = self
            .repository
            .insert_if_absent(*ExpiredPolicyLogId::new_v7().as_uuid(), *policy_id.as_uuid(), logged_at)
            .await?;
        Ok(inserted)
    }
}
