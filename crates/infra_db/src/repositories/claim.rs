//! Insurance claim repository implementation

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for insurance claims
///
/// Claims are insert-only.
#[derive(Debug, Clone)]
pub struct ClaimRepository {
    pool: PgPool,
}

impl ClaimRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all claims of a car ordered by claim date ascending
    pub async fn find_by_car(&self, car_id: Uuid) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT claim_id, car_id, claim_date, description, amount
            FROM insurance_claims
            WHERE car_id = $1
            ORDER BY claim_date ASC, created_at ASC, claim_id ASC
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Inserts a claim in a single statement
    pub async fn insert(&self, claim: &ClaimRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO insurance_claims (claim_id, car_id, claim_date, description, amount)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(claim.claim_id)
        .bind(claim.car_id)
        .bind(claim.claim_date)
        .bind(&claim.description)
        .bind(claim.amount)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Database row for an insurance claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub car_id: Uuid,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
}
