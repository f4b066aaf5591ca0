//! Insurance policy repository implementation

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for insurance policies
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all policies of a car
    ///
    /// Rows come back in insertion order so that repeated reads of the same
    /// data scan policies identically.
    pub async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE car_id = $1
            ORDER BY created_at, policy_id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves all policies whose last covered day is `end_date`
    pub async fn find_by_end_date(&self, end_date: NaiveDate) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT policy_id, car_id, provider, start_date, end_date
            FROM insurance_policies
            WHERE end_date = $1
            ORDER BY created_at, policy_id
            "#,
        )
        .bind(end_date)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a policy
    pub async fn insert(&self, policy: &PolicyRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO insurance_policies (policy_id, car_id, provider, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(policy.policy_id)
        .bind(policy.car_id)
        .bind(&policy.provider)
        .bind(policy.start_date)
        .bind(policy.end_date)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Database row for an insurance policy
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PolicyRow {
    pub policy_id: Uuid,
    pub car_id: Uuid,
    pub provider: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
