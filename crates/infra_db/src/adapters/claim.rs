//! PostgreSQL Claim Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{Amount, CarId, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_claims::{ClaimDescription, ClaimPort, InsuranceClaim, NewClaim};

use crate::error::DatabaseError;
use crate::repositories::claim::{ClaimRepository, ClaimRow};

/// PostgreSQL-backed implementation of the ClaimPort trait
#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimRepository,
    pool: PgPool,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl HealthCheckable for PostgresClaimAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        super::ping(&self.pool, "postgres-claim-adapter").await
    }
}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn find_by_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
        let rows = self.repository.find_by_car(*car_id.as_uuid()).await?;
        debug!(count = rows.len(), "Fetched claims");

        Ok(rows
            .into_iter()
            .map(row_to_claim)
            .collect::<Result<Vec<_>, _>>()?)
    }

    #[instrument(skip(self, claim), fields(car_id = %claim.car_id, claim_date = %claim.claim_date))]
    async fn save_claim(&self, claim: NewClaim) -> Result<InsuranceClaim, PortError> {
        let claim = claim.into_claim();
        self.repository.insert(&claim_to_row(&claim)).await?;
        Ok(claim)
    }
}

fn claim_to_row(claim: &InsuranceClaim) -> ClaimRow {
    ClaimRow {
        claim_id: *claim.id.as_uuid(),
        car_id: *claim.car_id.as_uuid(),
        claim_date: claim.claim_date,
        description: claim.description.to_string(),
        amount: claim.amount.value(),
    }
}

fn row_to_claim(row: ClaimRow) -> Result<InsuranceClaim, DatabaseError> {
    let description = ClaimDescription::parse(&row.description)
        .map_err(|e| DatabaseError::corrupt("insurance_claims", e))?;
    let amount = Amount::new(row.amount).map_err(|e| DatabaseError::corrupt("insurance_claims", e))?;

    Ok(InsuranceClaim {
        id: ClaimId::from_uuid(row.claim_id),
        car_id: CarId::from_uuid(row.car_id),
        claim_date: row.claim_date,
        description,
        amount,
    })
}
