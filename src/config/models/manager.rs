//! Provider manager configuration

use super::*;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main configuration for provider management
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderManagerConfig {
    /// Providers, in configuration order
    pub providers: Vec<ProviderConfig>,
    /// Fallback strategy
    #[serde(default)]
    pub fallback_strategy: FallbackStrategy,
    /// Health check interval in seconds (0 disables background probing)
    #[serde(default = "default_health_check_interval")]
    pub health_check_interval: u64,
    /// Circuit breaker settings
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
}

impl ProviderManagerConfig {
    /// Create a configuration with default settings for the given providers
    pub fn new(providers: Vec<ProviderConfig>) -> Self {
        Self {
            providers,
            fallback_strategy: FallbackStrategy::default(),
            health_check_interval: default_health_check_interval(),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }

    /// Set the fallback strategy (builder pattern)
    pub fn with_strategy(mut self, strategy: FallbackStrategy) -> Self {
        self.fallback_strategy = strategy;
        self
    }

    /// Set circuit breaker settings (builder pattern)
    pub fn with_circuit_breaker(mut self, failure_threshold: u32, recovery_timeout: u64) -> Self {
        self.circuit_breaker = CircuitBreakerConfig {
            failure_threshold,
            recovery_timeout,
        };
        self
    }

    /// Set the health check interval in seconds (builder pattern)
    pub fn with_health_check_interval(mut self, secs: u64) -> Self {
        self.health_check_interval = secs;
        self
    }

    /// Background probe interval, `None` when probing is disabled
    pub fn probe_interval(&self) -> Option<Duration> {
        (self.health_check_interval > 0).then(|| Duration::from_secs(self.health_check_interval))
    }

    /// Enabled providers, in configuration order
    pub fn enabled_providers(&self) -> impl Iterator<Item = &ProviderConfig> {
        self.providers.iter().filter(|p| p.enabled)
    }

    /// Resolve `${ENV_VAR}` references of every enabled provider
    ///
    /// Disabled providers are kept verbatim so that a missing variable for an
    /// unused provider does not block loading.
    pub fn resolved(&self) -> Result<Self> {
        let mut resolved = self.clone();
        for provider in resolved.providers.iter_mut().filter(|p| p.enabled) {
            *provider = provider.resolve_env_vars()?;
        }
        Ok(resolved)
    }
}
