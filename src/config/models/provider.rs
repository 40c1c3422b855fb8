//! Provider configuration

use super::*;
use crate::core::router::model_type::ModelType;
use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Model lists for one provider, per model type
///
/// Order matters: the rotation cursor hands models out in this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderModels {
    /// Big models (opus class)
    #[serde(default)]
    pub big: Vec<String>,
    /// Middle models (sonnet class)
    #[serde(default)]
    pub middle: Vec<String>,
    /// Small models (haiku class)
    #[serde(default)]
    pub small: Vec<String>,
}

impl ProviderModels {
    /// Models configured for a type
    pub fn models(&self, model_type: ModelType) -> &[String] {
        match model_type {
            ModelType::Big => &self.big,
            ModelType::Middle => &self.middle,
            ModelType::Small => &self.small,
        }
    }

    /// Whether no model of any type is configured
    pub fn is_empty(&self) -> bool {
        self.big.is_empty() && self.middle.is_empty() && self.small.is_empty()
    }
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider name (unique)
    pub name: String,
    /// Whether provider is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Priority order (lower = higher priority)
    pub priority: u32,
    /// API key (may use `${ENV_VAR}`)
    pub api_key: String,
    /// Base URL (may use `${ENV_VAR}`)
    pub base_url: String,
    /// API version (Azure)
    #[serde(default)]
    pub api_version: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Maximum retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Extra headers sent with every request (values may use `${ENV_VAR}`)
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,
    /// Model lists per type
    #[serde(default)]
    pub models: ProviderModels,
}

impl ProviderConfig {
    /// Create a provider with the given name and priority and default settings
    pub fn new(name: impl Into<String>, priority: u32) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            priority,
            api_key: String::new(),
            base_url: String::new(),
            api_version: None,
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            custom_headers: HashMap::new(),
            models: ProviderModels::default(),
        }
    }

    /// Set models for one type (builder pattern)
    pub fn with_models(mut self, model_type: ModelType, models: &[&str]) -> Self {
        let list = models.iter().map(|m| m.to_string()).collect();
        match model_type {
            ModelType::Big => self.models.big = list,
            ModelType::Middle => self.models.middle = list,
            ModelType::Small => self.models.small = list,
        }
        self
    }

    /// Set the enabled flag (builder pattern)
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Resolve `${ENV_VAR}` references in credentials, endpoint and headers
    pub fn resolve_env_vars(&self) -> Result<Self> {
        self.resolve_with(|var| std::env::var(var).ok())
    }

    /// Resolve `${VAR}` references using the given lookup
    pub(crate) fn resolve_with<F>(&self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut resolved = self.clone();

        resolved.api_key = resolve_value(&self.name, "API key", &self.api_key, &lookup)?;
        resolved.base_url = resolve_value(&self.name, "base URL", &self.base_url, &lookup)?;

        let mut headers = HashMap::with_capacity(self.custom_headers.len());
        for (key, value) in &self.custom_headers {
            let field = format!("custom header {}", key);
            headers.insert(key.clone(), resolve_value(&self.name, &field, value, &lookup)?);
        }
        resolved.custom_headers = headers;

        Ok(resolved)
    }
}

fn resolve_value<F>(provider: &str, field: &str, value: &str, lookup: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(var) => lookup(var).ok_or_else(|| {
            GatewayError::config(format!(
                "Error resolving environment variables for provider {}: environment variable {} not found for {}",
                provider, var, field
            ))
        }),
        None => Ok(value.to_string()),
    }
}
