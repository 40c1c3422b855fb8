//! Provider registry
//!
//! The registry owns one `ProviderState` per enabled provider, in
//! configuration order, plus the fallback strategy and breaker settings it was
//! built with. A registry is never reconfigured in place: a reload builds a
//! new one (see `ProviderManager`).

use super::clock::{Clock, SystemClock};
use super::provider_state::ProviderState;
use super::status::{OverallHealth, ProviderStatusReport};
use super::strategy_impl::{priority_order, random_order, round_robin_order};
use crate::config::models::{CircuitBreakerConfig, FallbackStrategy, ProviderManagerConfig};
use crate::config::validation::Validate;
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::Duration;
use tracing::{error, info, warn};

/// Registry of provider runtime state
#[derive(Debug)]
pub struct ProviderRegistry {
    /// Enabled providers, in configuration order
    pub(crate) providers: Vec<Arc<ProviderState>>,
    /// Provider name to position in `providers`
    index: HashMap<String, usize>,
    strategy: FallbackStrategy,
    circuit_breaker: CircuitBreakerConfig,
    health_check_interval: u64,
    /// Registry-wide counter for the round-robin strategy
    round_robin_counter: AtomicUsize,
    rng: Mutex<StdRng>,
    clock: Arc<dyn Clock>,
}

impl ProviderRegistry {
    /// Build a registry from configuration the caller has already validated
    ///
    /// Only enabled providers get runtime state.
    pub fn new(config: &ProviderManagerConfig) -> Self {
        let mut providers = Vec::new();
        let mut index = HashMap::new();

        for provider in config.enabled_providers() {
            info!(
                provider = %provider.name,
                priority = provider.priority,
                big = provider.models.big.len(),
                middle = provider.models.middle.len(),
                small = provider.models.small.len(),
                "Initialized provider"
            );
            index.insert(provider.name.clone(), providers.len());
            providers.push(Arc::new(ProviderState::new(
                provider.clone(),
                config.circuit_breaker,
            )));
        }

        if providers.is_empty() {
            warn!("No enabled providers configured");
        }

        Self {
            providers,
            index,
            strategy: config.fallback_strategy,
            circuit_breaker: config.circuit_breaker,
            health_check_interval: config.health_check_interval,
            round_robin_counter: AtomicUsize::new(0),
            rng: Mutex::new(StdRng::from_entropy()),
            clock: Arc::new(SystemClock),
        }
    }

    /// Validate the configuration and build a registry from it
    pub fn from_config(config: &ProviderManagerConfig) -> Result<Self> {
        config.validate().map_err(GatewayError::Validation)?;
        Ok(Self::new(config))
    }

    /// Use a seeded random source for the `Random` strategy (builder pattern)
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    /// Use a custom time source (builder pattern)
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current time from the registry clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn strategy(&self) -> FallbackStrategy {
        self.strategy
    }

    pub fn circuit_breaker(&self) -> &CircuitBreakerConfig {
        &self.circuit_breaker
    }

    /// Background probe interval, `None` when disabled
    pub fn probe_interval(&self) -> Option<Duration> {
        (self.health_check_interval > 0).then(|| Duration::from_secs(self.health_check_interval))
    }

    /// All providers, in configuration order
    pub fn providers(&self) -> &[Arc<ProviderState>] {
        &self.providers
    }

    /// Look up a provider by name
    pub fn get(&self, name: &str) -> Option<&Arc<ProviderState>> {
        self.index.get(name).and_then(|&i| self.providers.get(i))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Providers that may receive traffic at `now`, ordered by the strategy
    pub fn available_providers(&self, now: DateTime<Utc>) -> Vec<Arc<ProviderState>> {
        let mut available: Vec<_> = self
            .providers
            .iter()
            .filter(|p| p.is_available(now))
            .cloned()
            .collect();

        match self.strategy {
            FallbackStrategy::Priority => priority_order(&mut available),
            FallbackStrategy::RoundRobin => {
                round_robin_order(&mut available, &self.round_robin_counter)
            }
            FallbackStrategy::Random => random_order(&mut available, &self.rng),
        }

        available
    }

    // ========== Recording Methods ==========

    /// Record a successful call for a provider
    ///
    /// Returns `false` when the provider is unknown.
    pub fn record_success(&self, name: &str, now: DateTime<Utc>) -> bool {
        match self.get(name) {
            Some(provider) => {
                record_provider_success(provider, now);
                true
            }
            None => false,
        }
    }

    /// Record a failed call for a provider
    ///
    /// Returns `false` when the provider is unknown.
    pub fn record_failure(&self, name: &str, now: DateTime<Utc>) -> bool {
        match self.get(name) {
            Some(provider) => {
                record_provider_failure(provider, now);
                true
            }
            None => false,
        }
    }

    // ========== Reporting ==========

    /// Status of every provider, in configuration order
    pub fn status(&self) -> Vec<ProviderStatusReport> {
        self.providers.iter().map(|p| p.report()).collect()
    }

    /// Healthy when at least one provider is healthy
    pub fn overall_health(&self) -> OverallHealth {
        OverallHealth::from_reports(&self.status())
    }
}

/// Record a success against a captured provider and log recovery
pub(crate) fn record_provider_success(provider: &ProviderState, now: DateTime<Utc>) {
    if provider.record_success(now) {
        info!(provider = %provider.name(), "Provider recovered, circuit closed");
    }
}

/// Record a failure against a captured provider and log the transition
pub(crate) fn record_provider_failure(provider: &ProviderState, now: DateTime<Utc>) {
    let opened = provider.record_failure(now);
    let failure_count = provider.failure_count();
    if opened {
        error!(
            provider = %provider.name(),
            failure_count,
            "Provider circuit opened"
        );
    } else {
        warn!(
            provider = %provider.name(),
            failure_count,
            "Provider failure recorded"
        );
    }
}
