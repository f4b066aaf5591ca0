//! Per-car insurance history
//!
//! Policies and claims are stored independently. The history view merges
//! them into one timeline:
//!
//! - every policy contributes a start event
//! - a policy whose end date is strictly before today also contributes an
//!   end event
//! - every claim contributes a claim event tagged with the provider of the
//!   first policy (in fetch order) covering the claim date
//!
//! Events are stably sorted by date, so same-day events keep the order in
//! which they were produced: policy starts and ends first, then claims.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use core_kernel::{Amount, CarId, Timezone};
use domain_car::CarPort;
use domain_policy::{InsurancePolicy, PolicyPort};

use crate::claim::InsuranceClaim;
use crate::error::ClaimError;
use crate::ports::ClaimPort;

/// Provider reported for a claim no policy covers
pub const UNKNOWN_PROVIDER: &str = "Unknown";

/// Kind of history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryEventType {
    InsurancePolicyStart,
    InsurancePolicyEnd,
    InsuranceClaim,
}

/// One entry of a car's history; derived on request, never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarHistoryEvent {
    pub event_type: HistoryEventType,
    pub date: NaiveDate,
    pub description: String,
    /// Present on claim events only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    pub provider: String,
}

impl CarHistoryEvent {
    fn policy_start(policy: &InsurancePolicy) -> Self {
        Self {
            event_type: HistoryEventType::InsurancePolicyStart,
            date: policy.start_date(),
            description: format!(
                "Insurance policy started with {} (valid until {})",
                policy.provider,
                policy.end_date()
            ),
            amount: None,
            provider: policy.provider.clone(),
        }
    }

    fn policy_end(policy: &InsurancePolicy) -> Self {
        Self {
            event_type: HistoryEventType::InsurancePolicyEnd,
            date: policy.end_date(),
            description: format!("Insurance policy with {} expired", policy.provider),
            amount: None,
            provider: policy.provider.clone(),
        }
    }

    fn claim(claim: &InsuranceClaim, policies: &[InsurancePolicy]) -> Self {
        let provider = policies
            .iter()
            .find(|p| p.covers(claim.claim_date))
            .map(|p| p.provider.clone())
            .unwrap_or_else(|| UNKNOWN_PROVIDER.to_string());

        Self {
            event_type: HistoryEventType::InsuranceClaim,
            date: claim.claim_date,
            description: claim.description.to_string(),
            amount: Some(claim.amount),
            provider,
        }
    }
}

/// Builds the history timeline of a car
pub fn compose_history(
    policies: &[InsurancePolicy],
    claims: &[InsuranceClaim],
    today: NaiveDate,
) -> Vec<CarHistoryEvent> {
    let mut events = Vec::with_capacity(policies.len() * 2 + claims.len());

    for policy in policies {
        events.push(CarHistoryEvent::policy_start(policy));
        if policy.has_expired_by(today) {
            events.push(CarHistoryEvent::policy_end(policy));
        }
    }

    events.extend(claims.iter().map(|c| CarHistoryEvent::claim(c, policies)));

    // sort_by_key is stable
    events.sort_by_key(|e| e.date);
    events
}

/// Reads policies and claims of a car and merges them into its history
#[derive(Clone)]
pub struct HistoryComposer {
    cars: Arc<dyn CarPort>,
    policies: Arc<dyn PolicyPort>,
    claims: Arc<dyn ClaimPort>,
    timezone: Timezone,
}

impl HistoryComposer {
    pub fn new(
        cars: Arc<dyn CarPort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimPort>,
        timezone: Timezone,
    ) -> Self {
        Self {
            cars,
            policies,
            claims,
            timezone,
        }
    }

    /// Returns the history of a car as of today in the configured timezone
    pub async fn car_history(&self, car_id: CarId) -> Result<Vec<CarHistoryEvent>, ClaimError> {
        self.car_history_as_of(car_id, self.timezone.today()).await
    }

    /// Returns the history of a car, treating `today` as the current date
    ///
    /// # Errors
    ///
    /// Returns `ClaimError::CarNotFound` if the car does not exist.
    #[instrument(skip(self))]
    pub async fn car_history_as_of(
        &self,
        car_id: CarId,
        today: NaiveDate,
    ) -> Result<Vec<CarHistoryEvent>, ClaimError> {
        if self.cars.find_car(car_id).await?.is_none() {
            return Err(ClaimError::CarNotFound(car_id));
        }

        let policies = self.policies.find_by_car(car_id).await?;
        let claims = self.claims.find_by_car(car_id).await?;
        let events = compose_history(&policies, &claims, today);

        debug!(
            policies = policies.len(),
            claims = claims.len(),
            events = events.len(),
            "History composed"
        );
        Ok(events)
    }
}
