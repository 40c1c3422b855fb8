//! Core functionality
//!
//! - `router` - Provider selection, circuit breaking and failover
//! - `health` - Background probing of circuit-open providers

pub mod health;
pub mod router;
