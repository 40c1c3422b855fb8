//! Configuration validation
//!
//! This module provides validation logic for the provider configuration.
//!
//! - `trait_def`: the `Validate` trait
//! - `config_validators`: provider and manager validators
//! - `router_validators`: circuit breaker validators
//! - `tests`: test suite for all validators

mod config_validators;
mod router_validators;
mod trait_def;

pub use trait_def::Validate;
