//! Error handling for the failover engine
//!
//! This module defines the crate-level error type. Routing outcomes have their
//! own error type in [`crate::core::router::error`].

mod types;

pub use types::{GatewayError, Result};
