//! Router tests module
//!
//! Contains tests for selection, circuit breaking and failover sessions.


use crate::config::models::{FallbackStrategy, ProviderConfig, ProviderManagerConfig};
use crate::core::router::clock::ManualClock;
use crate::core::router::model_type::ModelType;
use crate::core::router::registry::ProviderRegistry;
use chrono::{TimeZone, Utc};
use std::sync::Arc;

/// Provider with small models only
pub(crate) fn small_provider(name: &str, priority: u32, models: &[&str]) -> ProviderConfig {
    ProviderConfig::new(name, priority).with_models(ModelType::Small, models)
}

pub(crate) fn manager_config(
    providers: Vec<ProviderConfig>,
    strategy: FallbackStrategy,
    failure_threshold: u32,
) -> ProviderManagerConfig {
    ProviderManagerConfig::new(providers)
        .with_strategy(strategy)
        .with_circuit_breaker(failure_threshold, 60)
        .with_health_check_interval(0)
}

pub(crate) fn test_clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()))
}

/// Registry driven by a manual clock
pub(crate) fn registry_with_clock(
    config: &ProviderManagerConfig,
) -> (Arc<ProviderRegistry>, Arc<ManualClock>) {
    let clock = test_clock();
    let registry = ProviderRegistry::from_config(config)
        .unwrap()
        .with_rng_seed(42)
        .with_clock(clock.clone());
    (Arc::new(registry), clock)
}
