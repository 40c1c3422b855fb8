//! Utility modules
//!
//! - **error**: Error types and conversions
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
