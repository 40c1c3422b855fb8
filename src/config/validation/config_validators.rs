//! Provider and manager configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::{debug, warn};

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Provider name cannot be empty".to_string());
        }

        if self.priority == 0 {
            return Err(format!(
                "Provider {} priority must be at least 1 (lower = higher priority)",
                self.name
            ));
        }

        if self.timeout == 0 {
            return Err(format!("Provider {} timeout must be greater than 0", self.name));
        }

        if self.enabled && self.models.is_empty() {
            // Not an error: the provider is simply never a candidate.
            warn!(
                provider = %self.name,
                "Provider is enabled but has no models configured for any type"
            );
        }

        Ok(())
    }
}

impl Validate for ProviderManagerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating provider manager configuration");

        if self.providers.is_empty() {
            return Err("At least one provider must be configured".to_string());
        }

        let mut names = HashSet::new();
        for provider in &self.providers {
            provider.validate()?;
            if !names.insert(provider.name.as_str()) {
                return Err(format!("Duplicate provider name: {}", provider.name));
            }
        }

        self.circuit_breaker.validate()?;

        Ok(())
    }
}
