//! Expired policy reporting
//!
//! Each policy is reported exactly once, on the first run after its last
//! covered day. Runs that see the same policy twice (overlapping schedules,
//! several server instances) are resolved by the log store's uniqueness on
//! policy id.

use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use tracing::{debug, info, instrument};

use crate::error::PolicyError;
use crate::ports::{ExpiredPolicyLogPort, PolicyPort};

/// Finds policies that ended yesterday and logs each one once
#[derive(Clone)]
pub struct ExpiredPolicyMonitor {
    policies: Arc<dyn PolicyPort>,
    log: Arc<dyn ExpiredPolicyLogPort>,
}

impl ExpiredPolicyMonitor {
    pub fn new(policies: Arc<dyn PolicyPort>, log: Arc<dyn ExpiredPolicyLogPort>) -> Self {
        Self { policies, log }
    }

    /// Reports policies whose end date is the day before `today`
    ///
    /// Returns the number of policies newly recorded by this run.
    #[instrument(skip(self))]
    pub async fn log_expired_policies(&self, today: NaiveDate) -> Result<usize, PolicyError> {
        let yesterday = today - Duration::days(1);
        let expiring = self.policies.find_expiring_on(yesterday).await?;

        let mut logged = 0;
        for policy in expiring {
            if self.log.is_logged(policy.id).await? {
                continue;
            }

            // A concurrent run may have inserted between the check and here
            if !self.log.record(policy.id, Utc::now()).await? {
                debug!(policy_id = %policy.id, "Expiry already recorded");
                continue;
            }

            info!(
                "Policy {} for car {} expired on {}",
                policy.id,
                policy.car_id,
                policy.end_date()
            );
            logged += 1;
        }

        Ok(logged)
    }
}
