//! Configuration management for the failover engine
//!
//! This module handles loading, validation, and environment resolution of the
//! provider configuration document.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigSource, LegacyEnvConfig, discover_config_path, load_provider_config};
pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, error, info};

impl ProviderManagerConfig {
    /// Load configuration from a JSON or YAML file
    ///
    /// The format is chosen by extension: `.yaml`/`.yml` is YAML, anything
    /// else is JSON. The loaded document is validated before it is returned.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading provider configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.inspect_err(|e| {
            error!(
                path = %path.display(),
                error = %e,
                "Provider configuration file not found or unreadable"
            );
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );

        let config: Self = if is_yaml {
            serde_yaml::from_str(&content).map_err(|e| {
                GatewayError::Config(format!("Invalid YAML in {}: {}", path.display(), e))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                GatewayError::Config(format!("Invalid JSON in {}: {}", path.display(), e))
            })?
        };

        config.validate_config()?;

        debug!("Provider configuration loaded successfully");
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate_config(&self) -> Result<()> {
        Validate::validate(self).map_err(GatewayError::validation)
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
