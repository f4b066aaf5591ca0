//! Policy Domain Ports
//!
//! Two stores back this domain:
//!
//! - `PolicyPort`: the policies themselves
//! - `ExpiredPolicyLogPort`: which expired policies have already been reported
//!
//! The log store must enforce at most one entry per policy. `record` reports
//! whether it inserted, which keeps the expiry job idempotent when two runs
//! overlap.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use core_kernel::{CarId, DomainPort, HealthCheckable, PolicyId, PortError};

use crate::policy::{InsurancePolicy, NewPolicy};

/// The port trait for policy storage
#[async_trait]
pub trait PolicyPort: DomainPort + HealthCheckable {
    /// Returns every policy of a car
    ///
    /// No ordering is guaranteed, but callers that scan the result rely on the
    /// adapter returning a stable order for the same data.
    async fn find_by_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Returns every policy whose last covered day is `date`
    async fn find_expiring_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError>;

    /// Persists a new policy
    async fn save_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, PortError>;
}

/// Extension trait for PolicyPort with convenience methods
#[async_trait]
pub trait PolicyPortExt: PolicyPort {
    /// Returns the policies of a car that cover the given date
    async fn find_covering(
        &self,
        car_id: CarId,
        date: NaiveDate,
    ) -> Result<Vec<InsurancePolicy>, PortError> {
        let policies = self.find_by_car(car_id).await?;
        Ok(policies.into_iter().filter(|p| p.covers(date)).collect())
    }
}

impl<T: PolicyPort + ?Sized> PolicyPortExt for T {}

/// The port trait for the expired-policy log
#[async_trait]
pub trait ExpiredPolicyLogPort: DomainPort + HealthCheckable {
    /// Returns true if the policy's expiry was already recorded
    async fn is_logged(&self, policy_id: PolicyId) -> Result<bool, PortError>;

    /// Records the policy's expiry
    ///
    /// Returns `false` without error when an entry for the policy already
    /// exists.
    async fn record(&self, policy_id: PolicyId, logged_at: DateTime<Utc>) -> Result<bool, PortError>;
}

/// Mock implementations for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use core_kernel::HealthCheckResult;

    use crate::policy::ExpiredPolicyLogEntry;

    /// In-memory policy store; `find_by_car` returns insertion order
    #[derive(Debug, Default, Clone)]
    pub struct MockPolicyPort {
        policies: Arc<RwLock<Vec<InsurancePolicy>>>,
    }

    impl MockPolicyPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with policies for testing
        pub async fn with_policies(policies: Vec<InsurancePolicy>) -> Self {
            let port = Self::new();
            port.policies.write().await.extend(policies);
            port
        }
    }

    impl DomainPort for MockPolicyPort {}

    #[async_trait]
    impl HealthCheckable for MockPolicyPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-policy-port", 0)
        }
    }

    #[async_trait]
    impl PolicyPort for MockPolicyPort {
        async fn find_by_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
            let policies = self.policies.read().await;
            Ok(policies.iter().filter(|p| p.car_id == car_id).cloned().collect())
        }

        async fn find_expiring_on(&self, date: NaiveDate) -> Result<Vec<InsurancePolicy>, PortError> {
            let policies = self.policies.read().await;
            Ok(policies.iter().filter(|p| p.end_date() == date).cloned().collect())
        }

        async fn save_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, PortError> {
            let policy = policy.into_policy();
            self.policies.write().await.push(policy.clone());
            Ok(policy)
        }
    }

    /// In-memory expired-policy log keyed by policy id
    #[derive(Debug, Default, Clone)]
    pub struct MockExpiredPolicyLogPort {
        entries: Arc<RwLock<HashMap<PolicyId, ExpiredPolicyLogEntry>>>,
    }

    impl MockExpiredPolicyLogPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a snapshot of all recorded entries
        pub async fn entries(&self) -> Vec<ExpiredPolicyLogEntry> {
            self.entries.read().await.values().cloned().collect()
        }
    }

    impl DomainPort for MockExpiredPolicyLogPort {}

    #[async_trait]
    impl HealthCheckable for MockExpiredPolicyLogPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-expired-policy-log-port", 0)
        }
    }

    #[async_trait]
    impl ExpiredPolicyLogPort for MockExpiredPolicyLogPort {
        async fn is_logged(&self, policy_id: PolicyId) -> Result<bool, PortError> {
            Ok(self.entries.read().await.contains_key(&policy_id))
        }

        async fn record(&self, policy_id: PolicyId, logged_at: DateTime<Utc>) -> Result<bool, PortError> {
            let mut entries = self.entries.write().await;
            if entries.contains_key(&policy_id) {
                return Ok(false);
            }
            entries.insert(policy_id, ExpiredPolicyLogEntry::new(policy_id, logged_at));
            Ok(true)
        }
    }
}
