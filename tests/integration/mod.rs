//! Integration tests for provider-failover
//!
//! These tests verify the interaction between multiple components
//! and test real system behavior without mocking.

pub mod config_validation_tests;
pub mod error_handling_tests;
pub mod reload_tests;
pub mod router_tests;
