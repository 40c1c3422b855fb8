//! Per-provider circuit breaker
//!
//! Two states, `Healthy` and `CircuitOpen`. Failures accumulate until the
//! configured threshold opens the circuit; a single success closes it again.
//! An open circuit admits trial traffic once the recovery window has elapsed
//! since the last failure, without changing state on read.

use crate::config::models::CircuitBreakerConfig;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderStatus {
    /// Accepting traffic
    Healthy,
    /// Too many failures; traffic only after the recovery window
    CircuitOpen,
}

impl ProviderStatus {
    /// Status name as reported in health output
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderStatus::Healthy => "healthy",
            ProviderStatus::CircuitOpen => "circuit_open",
        }
    }
}

impl fmt::Display for ProviderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point-in-time copy of the breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakerSnapshot {
    pub status: ProviderStatus,
    pub failure_count: u32,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
}

impl Default for BreakerSnapshot {
    fn default() -> Self {
        Self {
            status: ProviderStatus::Healthy,
            failure_count: 0,
            last_failure: None,
            last_success: None,
        }
    }
}

/// Circuit breaker for one provider
///
/// All transitions for a provider are serialized by one short lock; reads
/// copy the state out and never hold it across other work.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: Mutex<BreakerSnapshot>,
}

impl CircuitBreaker {
    /// Create a breaker in the `Healthy` state
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: Mutex::new(BreakerSnapshot::default()),
        }
    }

    /// Breaker settings
    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Record a failed call
    ///
    /// Returns `true` when this failure opened the circuit.
    pub fn record_failure(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        state.failure_count = state.failure_count.saturating_add(1);
        state.last_failure = Some(now);

        if state.failure_count >= self.config.failure_threshold
            && state.status != ProviderStatus::CircuitOpen
        {
            state.status = ProviderStatus::CircuitOpen;
            return true;
        }
        false
    }

    /// Record a successful call
    ///
    /// Returns `true` when this success closed an open circuit.
    pub fn record_success(&self, now: DateTime<Utc>) -> bool {
        let mut state = self.state.lock();
        let was_open = state.status == ProviderStatus::CircuitOpen;
        state.status = ProviderStatus::Healthy;
        state.failure_count = 0;
        state.last_success = Some(now);
        was_open
    }

    /// Whether the provider may receive traffic at `now`
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        let state = *self.state.lock();
        match state.status {
            ProviderStatus::Healthy => true,
            ProviderStatus::CircuitOpen => self.recovery_elapsed(&state, now),
        }
    }

    /// Whether the circuit is open and its recovery window has elapsed
    pub fn is_due_for_probe(&self, now: DateTime<Utc>) -> bool {
        let state = *self.state.lock();
        state.status == ProviderStatus::CircuitOpen && self.recovery_elapsed(&state, now)
    }

    fn recovery_elapsed(&self, state: &BreakerSnapshot, now: DateTime<Utc>) -> bool {
        match state.last_failure {
            Some(last_failure) => {
                now.signed_duration_since(last_failure) >= self.config.recovery_window()
            }
            None => true,
        }
    }

    /// Current status
    pub fn status(&self) -> ProviderStatus {
        self.state.lock().status
    }

    /// Consecutive failures since the last success
    pub fn failure_count(&self) -> u32 {
        self.state.lock().failure_count
    }

    /// Copy of the full state
    pub fn snapshot(&self) -> BreakerSnapshot {
        *self.state.lock()
    }
}
