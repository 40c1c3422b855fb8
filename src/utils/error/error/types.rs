//! Error types for the failover engine

use crate::core::router::error::RouterError;
use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Terminal routing failures
    #[error("Routing error: {0}")]
    Router(#[from] RouterError),
}

impl GatewayError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error was produced while loading or validating configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Validation(_) | Self::Serialization(_) | Self::Yaml(_)
        )
    }
}
