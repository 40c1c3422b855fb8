//! # provider-failover
//!
//! Provider and model selection with failover for proxies that sit in front
//! of several interchangeable model-serving backends.
//!
//! ## Features
//!
//! - **Model rotation**: each provider hands out its models of a class in
//!   turn through a shared cursor
//! - **Circuit breaking**: providers that keep failing are taken out of
//!   rotation until a recovery window elapses
//! - **Failover**: failed requests retry the next model on the same provider,
//!   then fall back to the next provider
//! - **Fallback strategies**: priority, round-robin and random ordering
//! - **Hot reload**: configuration is swapped atomically; in-flight requests
//!   finish against the registry they started with
//! - **Health probing**: a background task re-tests circuit-open providers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use provider_failover::{DispatchError, ModelType, ProviderManager, ProviderManagerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ProviderManagerConfig::from_file("config/providers.json")
//!         .await?
//!         .resolved()?;
//!     let manager = ProviderManager::from_config(&config)?;
//!
//!     let model_type = ModelType::classify("claude-3-5-haiku-20241022");
//!     let result = manager
//!         .execute(model_type, |candidate| async move {
//!             // Call candidate.provider.config().base_url with candidate.model here
//!             Ok::<_, DispatchError>(format!("served by {}", candidate.model))
//!         })
//!         .await?;
//!
//!     println!("{} via {}", result.result, result.provider);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::{
    CircuitBreakerConfig, FallbackStrategy, ProviderConfig, ProviderManagerConfig, ProviderModels,
};
pub use core::health::{HealthProbe, run_probe_round};
pub use core::router::{
    AttemptOutcome, Candidate, DispatchError, DispatchErrorKind, ExecutionResult, FailoverSession,
    ModelType, NextStep, ProviderManager, ProviderRegistry, ProviderState, ProviderStatus,
    RouterError,
};
pub use utils::error::{GatewayError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version
    pub version: &'static str,
    /// Git hash
    pub git_hash: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
}

impl BuildInfo {
    /// Build information of this binary
    pub fn current() -> Self {
        Self {
            version: VERSION,
            git_hash: env!("GIT_HASH"),
            build_time: env!("BUILD_TIME"),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} {})", self.version, self.git_hash, self.build_time)
    }
}
