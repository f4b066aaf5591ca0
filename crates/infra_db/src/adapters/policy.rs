//! PostgreSQL Policy Adapter

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{CarId, DateRange, DomainPort, HealthCheckResult, HealthCheckable, PolicyId, PortError};
use domain_policy::{InsurancePolicy, NewPolicy, PolicyPort};

use crate::error::DatabaseError;
use crate::repositories::policy::{PolicyRepository, PolicyRow};

/// PostgreSQL-backed implementation of the PolicyPort trait
#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
    pool: PgPool,
}

impl PostgresPolicyAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresPolicyAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-policy-adapter").await
    }
}

#[async_trait]
impl PolicyPort for PostgresPolicyAdapter {
    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn find_by_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.repository.find_by_car(*car_id.as_uuid()).await?;
        debug!(count = rows.len(), "Fetched policies");
        Ok(rows_to_policies(rows)?)
    }

    #[instrument(skip(self))]
    async fn find_expiring_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.repository.find_by_end_date(date).await?;
        Ok(rows_to_policies(rows)?)
    }

    #[instrument(skip(self, policy), fields(car_id = %policy.car_id))]
    async fn save_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, PortError> {
        let policy = policy.into_policy();
        self.repository.insert(&policy_to_row(&policy)).await?;
        Ok(policy)
    }
}

fn policy_to_row(policy: &InsurancePolicy) -> PolicyRow {
    PolicyRow {
        policy_id: *policy.id.as_uuid(),
        car_id: *policy.car_id.as_uuid(),
        provider: policy.provider.clone(),
        start_date: policy.start_date(),
        end_date: policy.end_date(),
    }
}

fn row_to_policy(row: PolicyRow) -> Result<InsurancePolicy, DatabaseError> {
    let period = DateRange::new(row.start_date, row.end_date)
        .map_err(|e| DatabaseError::corrupt("insurance_policies", e))?;

    Ok(InsurancePolicy {
        id: PolicyId::from_uuid(row.policy_id),
        car_id: CarId::from_uuid(row.car_id),
        provider: row.provider,
        period,
    })
}

fn rows_to_policies(rows: Vec<PolicyRow>) -> Result<Vec<InsurancePolicy>, DatabaseError> {
    rows.into_iter().map(row_to_policy).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_row_round_trip_keeps_period() {
        let policy = NewPolicy::new(CarId::new(), "Allianz", date(2024, 1, 1), date(2024, 12, 31))
            .unwrap()
            .into_policy();

        let back = row_to_policy(policy_to_row(&policy)).unwrap();
        assert_eq!(back, policy);
    }

    #[test]
    fn test_inverted_period_is_corrupt() {
        let row = PolicyRow {
            policy_id: uuid::Uuid::new_v4(),
            car_id: uuid::Uuid::new_v4(),
            provider: "Allianz".to_string(),
            start_date: date(2024, 12, 31),
            end_date: date(2024, 1, 1),
        };

        assert!(matches!(
            row_to_policy(row),
            Err(DatabaseError::CorruptRow { table: "insurance_policies", .. })
        ));
    }
}
