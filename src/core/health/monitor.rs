//! Periodic health probing task

use super::checker::run_probe_round;
use super::probe::HealthProbe;
use crate::core::router::ProviderRegistry;
use arc_swap::ArcSwap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Handle to a running background probe task
///
/// The task is aborted when the handle is stopped or dropped.
#[derive(Debug)]
pub struct HealthMonitor {
    handle: JoinHandle<()>,
    interval: Duration,
}

impl HealthMonitor {
    /// Spawn the probe loop
    ///
    /// Each tick probes the registry currently stored in `registry`, so a
    /// reload is picked up without restarting the task. The task runs on
    /// `runtime`, so the caller itself may be outside of it.
    pub fn spawn(
        runtime: &Handle,
        registry: Arc<ArcSwap<ProviderRegistry>>,
        probe: Arc<dyn HealthProbe>,
        every: Duration,
    ) -> Self {
        info!(interval_secs = every.as_secs(), "Starting provider health checks");

        let handle = runtime.spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; skip it so probing starts
            // one interval after startup.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let snapshot = registry.load_full();
                let probed = run_probe_round(&snapshot, probe.as_ref()).await;
                debug!(probed, "Health probe round finished");
            }
        });

        Self {
            handle,
            interval: every,
        }
    }

    /// Probe interval of the running task
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether the task has ended
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the task
    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
