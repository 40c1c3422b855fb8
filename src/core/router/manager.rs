//! Provider manager
//!
//! The owned entry point for the request-handling layer. It holds the current
//! `ProviderRegistry` behind an `ArcSwap`: readers take a cheap snapshot and
//! a reload swaps in a freshly built registry without blocking them. Sessions
//! keep the snapshot they started with, so their outcomes are never recorded
//! into a registry built after they began.

use super::error::{DispatchError, RouterError};
use super::fallback::ExecutionResult;
use super::model_type::ModelType;
use super::orchestrator::{Candidate, FailoverSession};
use super::registry::ProviderRegistry;
use super::selection::Selection;
use super::status::{HealthReport, OverallHealth, ProviderStatusReport};
use crate::config::models::ProviderManagerConfig;
use crate::core::health::{HealthMonitor, HealthProbe};
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use chrono::Utc;
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Health check wiring that outlives individual probe tasks
///
/// The probe and runtime stay armed across reloads, so a configuration that
/// turns probing off and later back on gets a fresh task.
struct HealthChecks {
    probe: Arc<dyn HealthProbe>,
    runtime: Handle,
    monitor: Option<HealthMonitor>,
}

/// Owner of the live provider registry
pub struct ProviderManager {
    registry: Arc<ArcSwap<ProviderRegistry>>,
    health: Mutex<Option<HealthChecks>>,
}

impl std::fmt::Debug for ProviderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderManager")
            .field("registry", &self.registry.load())
            .field("health_checks", &self.health.lock().is_some())
            .finish()
    }
}

impl ProviderManager {
    /// Wrap an existing registry
    pub fn new(registry: ProviderRegistry) -> Self {
        Self {
            registry: Arc::new(ArcSwap::from_pointee(registry)),
            health: Mutex::new(None),
        }
    }

    /// Validate the configuration and build the initial registry
    pub fn from_config(config: &ProviderManagerConfig) -> Result<Self> {
        Ok(Self::new(ProviderRegistry::from_config(config)?))
    }

    /// The current registry
    pub fn snapshot(&self) -> Arc<ProviderRegistry> {
        self.registry.load_full()
    }

    /// Replace the registry with one built from `config`
    ///
    /// All runtime state (breakers, cursors, counters) starts fresh. The
    /// current clock is carried over. When health checks were started, the
    /// probe task is brought in line with the new probe interval. Callable
    /// from any thread.
    pub fn reload(&self, config: &ProviderManagerConfig) -> Result<()> {
        let clock = Arc::clone(self.registry.load().clock());
        let registry = ProviderRegistry::from_config(config)?.with_clock(clock);
        let providers = registry.len();

        self.registry.store(Arc::new(registry));
        info!(providers, "Provider configuration reloaded");

        if let Some(checks) = self.health.lock().as_mut() {
            self.sync_monitor(checks);
        }
        Ok(())
    }

    /// Select a provider and model for a request against the current registry
    pub fn select_initial(&self, model_type: ModelType) -> Option<Selection> {
        let registry = self.registry.load();
        registry.select_initial(model_type, registry.now())
    }

    /// Start a failover session on the current registry
    pub fn begin(
        &self,
        model_type: ModelType,
    ) -> std::result::Result<(FailoverSession, Candidate), RouterError> {
        FailoverSession::begin(self.snapshot(), model_type)
    }

    /// Run `dispatch` through a failover session on the current registry
    pub async fn execute<T, F, Fut>(
        &self,
        model_type: ModelType,
        dispatch: F,
    ) -> std::result::Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(Candidate) -> Fut,
        Fut: Future<Output = std::result::Result<T, DispatchError>>,
    {
        self.snapshot().execute(model_type, dispatch).await
    }

    /// Status of every provider in the current registry
    pub fn status(&self) -> Vec<ProviderStatusReport> {
        self.registry.load().status()
    }

    /// Aggregate health of the current registry
    pub fn overall_health(&self) -> OverallHealth {
        self.registry.load().overall_health()
    }

    /// Full health document
    pub fn health_report(&self) -> HealthReport {
        let providers = self.status();
        HealthReport {
            status: OverallHealth::from_reports(&providers),
            timestamp: Utc::now(),
            providers,
        }
    }

    /// Start background probing of circuit-open providers
    ///
    /// Captures the current tokio runtime and arms `probe` for the lifetime
    /// of the manager. Returns whether a probe task is running: with a
    /// configured interval of 0 nothing runs until a reload sets a positive
    /// one. Outside a tokio runtime nothing is armed and `false` is returned.
    pub fn start_health_checks(&self, probe: Arc<dyn HealthProbe>) -> bool {
        let Ok(runtime) = Handle::try_current() else {
            warn!("Health checks require a tokio runtime; not started");
            return false;
        };

        let mut health = self.health.lock();
        if let Some(monitor) = health.take().and_then(|previous| previous.monitor) {
            monitor.stop();
        }
        let checks = health.insert(HealthChecks {
            probe,
            runtime,
            monitor: None,
        });
        let running = self.sync_monitor(checks);
        if !running {
            info!("Health checks disabled until the probe interval is set");
        }
        running
    }

    /// Whether a background probe task is running
    pub fn health_checks_running(&self) -> bool {
        self.health
            .lock()
            .as_ref()
            .and_then(|checks| checks.monitor.as_ref())
            .is_some_and(|monitor| !monitor.is_finished())
    }

    /// Stop background probing and disarm the probe
    ///
    /// Later reloads do not restart it; call `start_health_checks` again.
    pub fn shutdown(&self) {
        if let Some(checks) = self.health.lock().take() {
            info!("Stopping provider health checks");
            if let Some(monitor) = checks.monitor {
                monitor.stop();
            }
        }
    }

    /// Bring the probe task in line with the current registry's interval
    fn sync_monitor(&self, checks: &mut HealthChecks) -> bool {
        let interval = self.registry.load().probe_interval();
        match (interval, checks.monitor.take()) {
            (Some(every), Some(monitor))
                if monitor.interval() == every && !monitor.is_finished() =>
            {
                checks.monitor = Some(monitor);
            }
            (Some(every), previous) => {
                if let Some(previous) = previous {
                    previous.stop();
                }
                checks.monitor = Some(HealthMonitor::spawn(
                    &checks.runtime,
                    Arc::clone(&self.registry),
                    Arc::clone(&checks.probe),
                    every,
                ));
            }
            (None, previous) => {
                if let Some(previous) = previous {
                    info!("Health checks disabled by configuration");
                    previous.stop();
                }
            }
        }
        checks.monitor.is_some()
    }
}
