//! Background health probing for circuit-open providers
//!
//! Providers whose circuit is open only recover through a recorded success.
//! Without live traffic that success never comes, so a periodic task sends a
//! lightweight synthetic call to each open provider whose recovery window has
//! elapsed.
//!
//! # Module Structure
//!
//! - `probe` - The `HealthProbe` trait callers implement
//! - `checker` - One probing pass over a registry
//! - `monitor` - The periodic background task
//! - `tests` - Test suite for health probing

pub mod checker;
pub mod monitor;
pub mod probe;

pub use checker::run_probe_round;
pub use monitor::HealthMonitor;
pub use probe::HealthProbe;
