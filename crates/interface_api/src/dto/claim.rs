//! Claim DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Amount, CarId, ClaimId};
use domain_car::Car;
use domain_claims::InsuranceClaim;

use crate::validation::validate_claim_description;

/// Parameters of a claim registration
///
/// Sent as query parameters or as an urlencoded form body. Fields are strings
/// so that each one is validated with a specific message instead of failing
/// extraction as a whole.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterClaimRequest {
    pub claim_date: Option<String>,
    #[validate(required(message = "Description is required"), custom(function = "validate_claim_description"))]
    pub description: Option<String>,
    #[validate(required(message = "Amount is required"))]
    pub amount: Option<String>,
}

impl RegisterClaimRequest {
    /// Fills the fields missing here from `fallback`
    pub fn or(self, fallback: Self) -> Self {
        Self {
            claim_date: self.claim_date.or(fallback.claim_date),
            description: self.description.or(fallback.description),
            amount: self.amount.or(fallback.amount),
        }
    }
}

/// A stored claim together with the VIN of its car
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub car_id: CarId,
    pub vin: String,
    pub claim_date: NaiveDate,
    pub description: String,
    pub amount: Amount,
}

impl ClaimResponse {
    pub fn new(claim: InsuranceClaim, car: &Car) -> Self {
        Self {
            id: claim.id,
            car_id: claim.car_id,
            vin: car.vin.to_string(),
            claim_date: claim.claim_date,
            description: claim.description.to_string(),
            amount: claim.amount,
        }
    }
}
