//! Common test utilities for provider-failover
//!
//! This module provides shared test infrastructure for all tests:
//! - Configuration fixtures and temporary config files
//! - Scripted health probes
//! - Custom assertions and helpers
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::ConfigFactory;
//!
//! #[test]
//! fn my_test() {
//!     let config = ConfigFactory::two_tier();
//!     // ...
//! }
//! ```

pub mod providers;

// Re-export commonly used items
pub use fixtures::{ConfigFactory, TempConfig};
pub use providers::ScriptedProbe;
