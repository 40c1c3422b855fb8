//! Configuration loading and validation integration tests
//!
//! Tests for provider file loading, `${ENV_VAR}` resolution, discovery and
//! the legacy environment fallback.

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, TempConfig};
    use provider_failover::config::{
        ConfigSource, LegacyEnvConfig, Validate, discover_config_path, load_provider_config,
    };
    use provider_failover::{FallbackStrategy, GatewayError, ProviderManager, ProviderManagerConfig};

    fn no_env() -> LegacyEnvConfig {
        LegacyEnvConfig::from_vars(Vec::new()).unwrap()
    }

    // ==================== File Loading ====================

    /// A serialized configuration loads back unchanged
    #[tokio::test]
    async fn test_json_file_roundtrip() {
        let temp = TempConfig::new();
        let config = ConfigFactory::full(FallbackStrategy::RoundRobin);
        let path = temp.write_json("config/providers.json", &config);

        let loaded = ProviderManagerConfig::from_file(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    /// The documented JSON layout with defaults applied
    #[tokio::test]
    async fn test_documented_layout() {
        let temp = TempConfig::new();
        let path = temp.write(
            "providers.json",
            r#"{
                "providers": [
                    {
                        "name": "OpenRouter",
                        "enabled": true,
                        "priority": 1,
                        "api_key": "sk-or",
                        "base_url": "https://openrouter.ai/api/v1",
                        "custom_headers": {"HTTP-Referer": "https://example.com"},
                        "models": {
                            "big": ["anthropic/claude-3-opus"],
                            "middle": ["anthropic/claude-3.5-sonnet"],
                            "small": ["anthropic/claude-3-haiku", "google/gemini-flash"]
                        }
                    }
                ]
            }"#,
        );

        let config = ProviderManagerConfig::from_file(&path).await.unwrap();
        let provider = &config.providers[0];
        assert!(provider.enabled);
        assert_eq!(provider.timeout, 90);
        assert_eq!(provider.max_retries, 3);
        assert_eq!(provider.api_version, None);
        assert_eq!(provider.models.small.len(), 2);
        assert_eq!(config.fallback_strategy, FallbackStrategy::Priority);
        assert_eq!(config.health_check_interval, 300);
        assert_eq!(config.circuit_breaker.failure_threshold, 5);
        assert_eq!(config.circuit_breaker.recovery_timeout, 60);
    }

    /// Unknown strategy names are rejected
    #[tokio::test]
    async fn test_unknown_strategy_rejected() {
        let temp = TempConfig::new();
        let path = temp.write(
            "providers.json",
            r#"{"providers": [], "fallback_strategy": "fastest"}"#,
        );

        let err = ProviderManagerConfig::from_file(&path).await.unwrap_err();
        assert!(err.is_config_error());
    }

    // ==================== Validation ====================

    /// Zero threshold fails validation
    #[test]
    fn test_zero_threshold_invalid() {
        let config = ConfigFactory::two_tier().with_circuit_breaker(0, 60);
        let result = config.validate();
        assert!(result.is_err());
        assert!(ProviderManager::from_config(&config).is_err());
    }

    /// Duplicate names fail validation
    #[test]
    fn test_duplicate_names_invalid() {
        let mut config = ConfigFactory::two_tier();
        config.providers[1].name = "A".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.contains("Duplicate provider name"));
    }

    /// A provider without models is only a warning
    #[test]
    fn test_provider_without_models_is_valid() {
        let mut config = ConfigFactory::two_tier();
        config.providers.push(ConfigFactory::provider("empty", 3, &[]));
        assert!(config.validate().is_ok());
    }

    // ==================== Discovery and fallback ====================

    /// The real file wins over the example file
    #[test]
    fn test_discovery_order() {
        let temp = TempConfig::new();
        let example = temp.write("config/providers.example.json", "{}");
        assert_eq!(
            discover_config_path(temp.root()),
            Some(ConfigSource::ExampleFile(example))
        );

        let root_file = temp.write("providers.json", "{}");
        assert_eq!(
            discover_config_path(temp.root()),
            Some(ConfigSource::File(root_file))
        );

        let config_file = temp.write("config/providers.json", "{}");
        assert_eq!(
            discover_config_path(temp.root()),
            Some(ConfigSource::File(config_file))
        );
    }

    /// An explicit path is used even when a discovered file exists
    #[tokio::test]
    async fn test_explicit_path_wins() {
        let temp = TempConfig::new();
        temp.write_json("providers.json", &ConfigFactory::two_tier());
        let explicit = temp.write_json("custom.json", &ConfigFactory::single(3));

        let (config, source) = load_provider_config(Some(&explicit), temp.root(), &no_env())
            .await
            .unwrap();
        assert_eq!(source, ConfigSource::File(explicit));
        assert_eq!(config.providers.len(), 1);
        assert_eq!(config.circuit_breaker.failure_threshold, 3);
    }

    /// Unresolvable `${VAR}` references fall back to legacy mode
    #[tokio::test]
    async fn test_missing_env_reference_falls_back() {
        let temp = TempConfig::new();
        let mut config = ConfigFactory::two_tier();
        config.providers[0].api_key = "${PROVIDER_FAILOVER_TEST_UNSET_KEY}".to_string();
        temp.write_json("providers.json", &config);

        let legacy = LegacyEnvConfig::from_vars(vec![(
            "OPENAI_API_KEY".to_string(),
            "sk-legacy".to_string(),
        )])
        .unwrap();

        let (config, source) = load_provider_config(None, temp.root(), &legacy)
            .await
            .unwrap();
        assert_eq!(source, ConfigSource::LegacyEnv);
        assert_eq!(config.providers[0].api_key, "sk-legacy");
    }

    /// Nothing configured at all is an error
    #[tokio::test]
    async fn test_nothing_configured() {
        let temp = TempConfig::new();
        let err = load_provider_config(None, temp.root(), &no_env())
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
