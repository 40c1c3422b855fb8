//! Configuration loading utilities
//!
//! Locates the provider file, or builds a single-provider configuration from
//! the legacy environment variables when no file is present.

use super::models::*;
use crate::core::router::model_type::ModelType;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Name of the provider built from legacy environment variables
pub const LEGACY_PROVIDER_NAME: &str = "Legacy Claude Code Proxy";

const CONFIG_CANDIDATES: [&str; 2] = ["config/providers.json", "providers.json"];
const EXAMPLE_CANDIDATES: [&str; 2] = ["config/providers.example.json", "providers.example.json"];

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A provider configuration file
    File(PathBuf),
    /// An example file, used because no real configuration exists
    ExampleFile(PathBuf),
    /// Legacy single-provider environment variables
    LegacyEnv,
}

/// Find the provider configuration file under `root`
///
/// Real configuration files win over example files.
pub fn discover_config_path(root: &Path) -> Option<ConfigSource> {
    if let Some(path) = CONFIG_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())
    {
        return Some(ConfigSource::File(path));
    }

    let example = EXAMPLE_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.exists())?;

    warn!("Using example config file: {}", example.display());
    warn!("Please create config/providers.json from the example file");
    Some(ConfigSource::ExampleFile(example))
}

/// Legacy single-provider settings read from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyEnvConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub azure_api_version: Option<String>,
    pub request_timeout: u64,
    pub max_retries: u32,
    pub big_model: String,
    pub middle_model: String,
    pub small_model: String,
    pub custom_headers: HashMap<String, String>,
}

impl LegacyEnvConfig {
    /// Read the legacy settings from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::vars())
    }

    /// Read the legacy settings from an explicit variable list
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: HashMap<String, String> = vars.into_iter().collect();
        let get = |key: &str| vars.get(key).filter(|v| !v.is_empty()).cloned();

        let request_timeout = match get("REQUEST_TIMEOUT") {
            Some(value) => value
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid REQUEST_TIMEOUT: {}", e)))?,
            None => 90,
        };
        let max_retries = match get("MAX_RETRIES") {
            Some(value) => value
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid MAX_RETRIES: {}", e)))?,
            None => 2,
        };

        let big_model = get("BIG_MODEL").unwrap_or_else(|| "gpt-4o".to_string());
        let middle_model = get("MIDDLE_MODEL").unwrap_or_else(|| big_model.clone());
        let small_model = get("SMALL_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());

        // CUSTOM_HEADER_X_API_TEAM=core becomes "X-API-TEAM: core"
        let custom_headers = vars
            .iter()
            .filter_map(|(key, value)| {
                let header = key.strip_prefix("CUSTOM_HEADER_")?;
                (!header.is_empty()).then(|| (header.replace('_', "-"), value.clone()))
            })
            .collect();

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            azure_api_version: get("AZURE_API_VERSION"),
            request_timeout,
            max_retries,
            big_model,
            middle_model,
            small_model,
            custom_headers,
        })
    }
}

impl ProviderManagerConfig {
    /// Build a single-provider configuration from legacy settings
    ///
    /// Fails when `OPENAI_API_KEY` is not set.
    pub fn from_legacy(legacy: &LegacyEnvConfig) -> Result<Self> {
        let api_key = legacy.openai_api_key.clone().ok_or_else(|| {
            GatewayError::Config(
                "OPENAI_API_KEY not found in environment variables; set it or configure providers.json"
                    .to_string(),
            )
        })?;

        let provider = ProviderConfig {
            api_key,
            base_url: legacy.openai_base_url.clone(),
            api_version: legacy.azure_api_version.clone(),
            timeout: legacy.request_timeout,
            max_retries: legacy.max_retries,
            custom_headers: legacy.custom_headers.clone(),
            ..ProviderConfig::new(LEGACY_PROVIDER_NAME, 1)
        }
        .with_models(ModelType::Big, &[legacy.big_model.as_str()])
        .with_models(ModelType::Middle, &[legacy.middle_model.as_str()])
        .with_models(ModelType::Small, &[legacy.small_model.as_str()]);

        Ok(Self::new(vec![provider]))
    }
}

/// Load the provider configuration the way the proxy does at startup
///
/// Order: explicit path, then a discovered file under `root`, then legacy
/// environment variables. A file that fails to load or has no enabled
/// provider falls back to the legacy configuration. The returned
/// configuration has its `${ENV_VAR}` references resolved.
pub async fn load_provider_config(
    explicit: Option<&Path>,
    root: &Path,
    legacy: &LegacyEnvConfig,
) -> Result<(ProviderManagerConfig, ConfigSource)> {
    let source = match explicit {
        Some(path) => Some(ConfigSource::File(path.to_path_buf())),
        None => discover_config_path(root),
    };

    if let Some((source, path)) = source.and_then(|source| match &source {
        ConfigSource::File(path) | ConfigSource::ExampleFile(path) => {
            let path = path.clone();
            Some((source, path))
        }
        ConfigSource::LegacyEnv => None,
    }) {
        match load_file(&path).await {
            Ok(config) if config.enabled_providers().next().is_some() => {
                info!(
                    "Loaded provider configuration from {} ({} enabled provider(s))",
                    path.display(),
                    config.enabled_providers().count()
                );
                return Ok((config, source));
            }
            Ok(_) => {
                error!("No providers were successfully initialized");
                warn!("Falling back to legacy configuration");
            }
            Err(e) => {
                error!("Failed to load provider config from {}: {}", path.display(), e);
                warn!("Falling back to legacy configuration");
            }
        }
    }

    let config = ProviderManagerConfig::from_legacy(legacy)?;
    info!("Using legacy environment variable configuration");
    Ok((config, ConfigSource::LegacyEnv))
}

async fn load_file(path: &Path) -> Result<ProviderManagerConfig> {
    let config = ProviderManagerConfig::from_file(path).await?;
    debug!("Resolving environment references for {}", path.display());
    config.resolved()
}
