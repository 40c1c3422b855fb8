//! Runtime state for one configured provider
//!
//! `ProviderState` wraps an immutable `ProviderConfig` with the mutable parts
//! the router needs:
//! - the circuit breaker (health status, failure count, timestamps)
//! - one rotation cursor per model type
//! - lifetime request counters
//!
//! Cursors and counters are atomics with `Relaxed` ordering; the breaker
//! serializes its own transitions.

use super::circuit_breaker::{CircuitBreaker, ProviderStatus};
use super::model_type::ModelType;
use super::status::ProviderStatusReport;
use crate::config::models::{CircuitBreakerConfig, ProviderConfig};
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering::Relaxed};

/// Cheapest classes first; probes use the first model found
const PROBE_ORDER: [ModelType; 3] = [ModelType::Small, ModelType::Middle, ModelType::Big];

/// Runtime wrapper around one provider
#[derive(Debug)]
pub struct ProviderState {
    config: ProviderConfig,
    breaker: CircuitBreaker,
    /// Rotation cursor per model type, indexed by `ModelType::index`
    cursors: [AtomicUsize; 3],
    total_requests: AtomicU64,
    success_requests: AtomicU64,
    fail_requests: AtomicU64,
}

impl ProviderState {
    /// Create fresh state for a provider
    pub fn new(config: ProviderConfig, breaker: CircuitBreakerConfig) -> Self {
        Self {
            config,
            breaker: CircuitBreaker::new(breaker),
            cursors: Default::default(),
            total_requests: AtomicU64::new(0),
            success_requests: AtomicU64::new(0),
            fail_requests: AtomicU64::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn priority(&self) -> u32 {
        self.config.priority
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Static provider configuration
    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Configured models of a type, in rotation order
    pub fn models(&self, model_type: ModelType) -> &[String] {
        self.config.models.models(model_type)
    }

    /// Whether at least one model of the type is configured
    pub fn has_models(&self, model_type: ModelType) -> bool {
        !self.models(model_type).is_empty()
    }

    /// Hand out the next model of a type and advance the cursor
    ///
    /// The cursor is shared by every caller: across N consecutive calls for a
    /// type with N models, each model is returned exactly once. Returns `None`
    /// when the provider has no models of the type.
    pub fn next_model(&self, model_type: ModelType) -> Option<&str> {
        let models = self.models(model_type);
        let len = models.len();
        if len == 0 {
            return None;
        }

        let cursor = &self.cursors[model_type.index()];
        // The closure always returns Some, so both arms carry the previous value
        let index = match cursor.fetch_update(Relaxed, Relaxed, |i| Some((i + 1) % len)) {
            Ok(previous) | Err(previous) => previous % len,
        };
        models.get(index).map(String::as_str)
    }

    /// Current cursor position for a type
    pub fn cursor(&self, model_type: ModelType) -> usize {
        self.cursors[model_type.index()].load(Relaxed)
    }

    /// Model used for synthetic health probes
    ///
    /// The first model of the cheapest configured class. Does not touch the
    /// rotation cursor.
    pub fn probe_model(&self) -> Option<&str> {
        PROBE_ORDER
            .iter()
            .find_map(|&model_type| self.models(model_type).first())
            .map(String::as_str)
    }

    /// Whether the provider may receive traffic at `now`
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        self.is_enabled() && self.breaker.is_available(now)
    }

    pub fn status(&self) -> ProviderStatus {
        self.breaker.status()
    }

    pub fn failure_count(&self) -> u32 {
        self.breaker.failure_count()
    }

    /// Record a successful call; returns `true` when the circuit closed
    pub fn record_success(&self, now: DateTime<Utc>) -> bool {
        self.total_requests.fetch_add(1, Relaxed);
        self.success_requests.fetch_add(1, Relaxed);
        self.breaker.record_success(now)
    }

    /// Record a failed call; returns `true` when the circuit opened
    pub fn record_failure(&self, now: DateTime<Utc>) -> bool {
        self.total_requests.fetch_add(1, Relaxed);
        self.fail_requests.fetch_add(1, Relaxed);
        self.breaker.record_failure(now)
    }

    /// Lifetime request counters: (total, success, fail)
    pub fn request_counts(&self) -> (u64, u64, u64) {
        (
            self.total_requests.load(Relaxed),
            self.success_requests.load(Relaxed),
            self.fail_requests.load(Relaxed),
        )
    }

    /// Health report for this provider
    pub fn report(&self) -> ProviderStatusReport {
        let breaker = self.breaker.snapshot();
        let (total_requests, success_requests, fail_requests) = self.request_counts();
        ProviderStatusReport {
            name: self.config.name.clone(),
            status: breaker.status,
            priority: self.config.priority,
            failure_count: breaker.failure_count,
            last_failure: breaker.last_failure,
            last_success: breaker.last_success,
            models: self.config.models.clone(),
            total_requests,
            success_requests,
            fail_requests,
        }
    }
}
