//! Insurance policy records

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, CoreError, DateRange, ExpiredPolicyLogId, PolicyId};

/// An insurance policy held by a car
///
/// The period is inclusive on both ends: a policy valid `2024-01-01` to
/// `2024-12-31` covers both of those days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: PolicyId,
    pub car_id: CarId,
    /// Insurer name, free text
    pub provider: String,
    pub period: DateRange,
}

impl InsurancePolicy {
    pub fn start_date(&self) -> NaiveDate {
        self.period.start()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.period.end()
    }

    /// Returns true if the policy covers the given date
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.period.contains(date)
    }

    /// Returns true once the last covered day is strictly in the past
    pub fn has_expired_by(&self, today: NaiveDate) -> bool {
        self.period.ended_before(today)
    }
}

/// Validated data for a new policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    pub car_id: CarId,
    pub provider: String,
    pub period: DateRange,
}

impl NewPolicy {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank provider and
    /// `CoreError::Temporal` when start is after end.
    pub fn new(
        car_id: CarId,
        provider: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, CoreError> {
        let provider = provider.into().trim().to_string();
        if provider.is_empty() {
            return Err(CoreError::validation("Provider is required"));
        }

        Ok(Self {
            car_id,
            provider,
            period: DateRange::new(start, end)?,
        })
    }

    pub fn into_policy(self) -> InsurancePolicy {
        InsurancePolicy {
            id: PolicyId::new_v7(),
            car_id: self.car_id,
            provider: self.provider,
            period: self.period,
        }
    }
}

/// Record that a policy's expiry has been reported
///
/// At most one entry exists per policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredPolicyLogEntry {
    pub id: ExpiredPolicyLogId,
    pub policy_id: PolicyId,
    pub logged_at: DateTime<Utc>,
}

impl ExpiredPolicyLogEntry {
    pub fn new(policy_id: PolicyId, logged_at: DateTime<Utc>) -> Self {
        Self {
            id: ExpiredPolicyLogId::new_v7(),
            policy_id,
            logged_at,
        }
    }
}
