//! Configuration data models
//!
//! This module defines the configuration structures consumed by the provider
//! registry. Defaults mirror the JSON provider file format.

pub mod manager;
pub mod provider;
pub mod router;

// Re-export all configuration types
pub use manager::*;
pub use provider::*;
pub use router::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    90
}

/// Default maximum retry attempts
pub fn default_max_retries() -> u32 {
    3
}

/// Default health check interval in seconds
pub fn default_health_check_interval() -> u64 {
    300
}

/// Default failure threshold
pub fn default_failure_threshold() -> u32 {
    5
}

/// Default recovery timeout in seconds
pub fn default_recovery_timeout() -> u64 {
    60
}

pub(crate) fn default_true() -> bool {
    true
}
