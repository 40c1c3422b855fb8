//! Logging setup
//!
//! Installs the global `tracing` subscriber used by the binary. Library code
//! only emits events; it never installs a subscriber itself.

use crate::utils::error::{GatewayError, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter
///
/// `RUST_LOG` wins over `level` when it is set and valid.
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|e| GatewayError::Config(format!("Invalid log level '{}': {}", level, e)))
}

/// Initialize the global tracing subscriber
///
/// `json` switches to one JSON object per event.
pub fn init_tracing(level: &str, json: bool) -> Result<()> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let result = if json {
        builder.json().with_current_span(true).try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| GatewayError::Config(format!("Failed to initialize logging: {}", e)))
}
