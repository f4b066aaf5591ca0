//! Background expiry scan
//!
//! Runs `ExpiredPolicyMonitor` on a fixed interval for the lifetime of the
//! server. A failed run is logged and retried on the next tick.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use core_kernel::Timezone;
use domain_policy::ExpiredPolicyMonitor;

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Spawns the periodic expired-policy scan
///
/// The first scan happens immediately. Intervals below one second are raised
/// to one second.
pub fn spawn_expiry_monitor(
    monitor: ExpiredPolicyMonitor,
    timezone: Timezone,
    every: Duration,
) -> JoinHandle<()> {
    let every = every.max(MIN_INTERVAL);
    info!(interval_secs = every.as_secs(), "Starting expired policy monitor");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match monitor.log_expired_policies(timezone.today()).await {
                Ok(logged) => debug!(logged, "Expired policy scan finished"),
                Err(e) => warn!(error = %e, "Expired policy scan failed"),
            }
        }
    })
}
