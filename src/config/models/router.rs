//! Router configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordering policy for available providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// Ascending priority, ties in configuration order
    #[default]
    Priority,
    /// Priority order rotated by a registry-wide counter
    RoundRobin,
    /// Uniform shuffle
    Random,
}

impl fmt::Display for FallbackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FallbackStrategy::Priority => "priority",
            FallbackStrategy::RoundRobin => "round_robin",
            FallbackStrategy::Random => "random",
        };
        f.write_str(name)
    }
}

const MAX_RECOVERY_TIMEOUT_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Circuit breaker configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Number of failures before opening circuit
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,
    /// Seconds to wait before attempting recovery
    #[serde(default = "default_recovery_timeout")]
    pub recovery_timeout: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: default_failure_threshold(),
            recovery_timeout: default_recovery_timeout(),
        }
    }
}

impl CircuitBreakerConfig {
    /// Recovery window as a chrono duration, capped at ten years
    pub fn recovery_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.recovery_timeout.min(MAX_RECOVERY_TIMEOUT_SECS) as i64)
    }
}
