//! Configuration reload integration tests
//!
//! A reload swaps in a fresh registry while sessions that already started keep
//! the snapshot they began with.

#[cfg(test)]
mod tests {
    use crate::common::assertions::assert_provider_state;
    use crate::common::{ConfigFactory, ScriptedProbe, TempConfig};
    use provider_failover::{
        AttemptOutcome, DispatchError, ModelType, NextStep, ProviderManager, ProviderManagerConfig,
        ProviderStatus,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reload_from_file_resets_state() {
        let temp = TempConfig::new();
        let initial = ConfigFactory::two_tier().with_circuit_breaker(1, 60);
        let manager = ProviderManager::from_config(&initial).unwrap();

        manager.snapshot().record_failure("A", chrono::Utc::now());
        assert_provider_state(&manager.snapshot(), "A", ProviderStatus::CircuitOpen, 1);

        let updated = ConfigFactory::two_tier()
            .with_circuit_breaker(1, 60)
            .with_strategy(provider_failover::FallbackStrategy::Random);
        let path = temp.write_json("config/providers.json", &updated);
        let loaded = ProviderManagerConfig::from_file(&path).await.unwrap();
        manager.reload(&loaded).unwrap();

        let registry = manager.snapshot();
        assert_eq!(registry.strategy(), provider_failover::FallbackStrategy::Random);
        assert_provider_state(&registry, "A", ProviderStatus::Healthy, 0);
    }

    #[test]
    fn test_invalid_reload_keeps_current_registry() {
        let manager = ProviderManager::from_config(&ConfigFactory::two_tier()).unwrap();
        let before = manager.snapshot();

        let err = manager
            .reload(&ProviderManagerConfig::new(Vec::new()))
            .unwrap_err();
        assert!(err.is_config_error());
        assert!(Arc::ptr_eq(&before, &manager.snapshot()));
        assert_eq!(manager.status().len(), 2);
    }

    #[test]
    fn test_in_flight_session_keeps_its_snapshot() {
        let manager = ProviderManager::from_config(&ConfigFactory::two_tier()).unwrap();
        let (mut session, candidate) = manager.begin(ModelType::Small).unwrap();
        let old = manager.snapshot();

        let replacement = ProviderManagerConfig::new(vec![ConfigFactory::provider(
            "C",
            1,
            &["m9"],
        )])
        .with_health_check_interval(0);
        manager.reload(&replacement).unwrap();

        // The session still fails over inside the registry it started with
        let next = match session.report_outcome(
            candidate,
            AttemptOutcome::Failure(DispatchError::from_status(500, "boom")),
        ) {
            NextStep::Retry(next) => next,
            other => panic!("expected retry, got {:?}", other),
        };
        assert_eq!(next.provider_name(), "A");
        assert_eq!(next.model, "m2");

        assert_provider_state(&old, "A", ProviderStatus::Healthy, 1);
        let current = manager.snapshot();
        assert!(current.get("A").is_none());
        assert_eq!(current.get("C").unwrap().failure_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reload_disables_health_checks() {
        let manager = ProviderManager::from_config(
            &ConfigFactory::two_tier().with_health_check_interval(5),
        )
        .unwrap();
        assert!(manager.start_health_checks(Arc::new(ScriptedProbe::new())));
        assert!(manager.health_checks_running());

        manager.reload(&ConfigFactory::two_tier()).unwrap();
        assert!(!manager.health_checks_running());
    }
}
