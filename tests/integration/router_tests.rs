//! Failover integration tests
//!
//! Drives full request flows through `ProviderManager` with scripted
//! dispatch outcomes.

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use crate::common::assertions::{RouterErrorAssertions, assert_provider_state};
    use provider_failover::{
        AttemptOutcome, DispatchError, FallbackStrategy, ModelType, NextStep, ProviderManager,
        ProviderStatus, RouterError,
    };
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_rate_limited_primary_falls_back() {
        let manager = ProviderManager::from_config(&ConfigFactory::two_tier()).unwrap();

        let result = manager
            .execute(ModelType::classify("claude-3-5-haiku-20241022"), |candidate| async move {
                match candidate.provider_name() {
                    "A" => Err(DispatchError::from_status(429, "Too Many Requests")),
                    _ => Ok(candidate.model.clone()),
                }
            })
            .await
            .unwrap();

        assert_eq!(result.result, "m4");
        assert_eq!(result.attempts, 4);
        assert!(result.used_fallback);

        let registry = manager.snapshot();
        assert_provider_state(&registry, "A", ProviderStatus::Healthy, 3);
        assert_provider_state(&registry, "B", ProviderStatus::Healthy, 0);
        assert!(manager.status()[1].last_success.is_some());
    }

    #[tokio::test]
    async fn test_exhaustion_reports_full_chain() {
        let manager = ProviderManager::from_config(&ConfigFactory::two_tier()).unwrap();

        let err = manager
            .execute(ModelType::Small, |_candidate| async {
                Err::<(), _>(DispatchError::from_status(500, "Internal Server Error"))
            })
            .await
            .unwrap_err();

        err.assert_exhausted_chain(&[("A", "m1"), ("A", "m2"), ("A", "m3"), ("B", "m4")]);
    }

    #[tokio::test]
    async fn test_open_circuit_is_skipped_by_next_request() {
        let config = ConfigFactory::two_tier().with_circuit_breaker(2, 60);
        let manager = ProviderManager::from_config(&config).unwrap();

        // A fails twice and opens; B serves
        let first = manager
            .execute(ModelType::Small, |candidate| async move {
                if candidate.provider_name() == "A" {
                    Err(DispatchError::timeout("upstream timeout"))
                } else {
                    Ok(())
                }
            })
            .await
            .unwrap();
        assert_eq!(first.attempts, 3);
        assert_provider_state(&manager.snapshot(), "A", ProviderStatus::CircuitOpen, 2);

        let second = manager
            .execute(ModelType::Small, |candidate| async move {
                Ok::<_, DispatchError>(candidate.provider_name().to_string())
            })
            .await
            .unwrap();
        assert_eq!(second.result, "B");
        assert_eq!(second.attempts, 1);
        assert!(!second.used_fallback);
    }

    #[test]
    fn test_manual_session_drive() {
        let manager = ProviderManager::from_config(&ConfigFactory::two_tier()).unwrap();
        let (mut session, mut candidate) = manager.begin(ModelType::Small).unwrap();

        let mut attempts = vec![candidate.attempt];
        loop {
            let outcome = if candidate.attempt < 3 {
                AttemptOutcome::Failure(DispatchError::network("connection refused"))
            } else {
                AttemptOutcome::Success
            };
            match session.report_outcome(candidate, outcome) {
                NextStep::Retry(next) => {
                    attempts.push(next.attempt);
                    candidate = next;
                }
                NextStep::Done(summary) => {
                    assert_eq!(summary.provider, "A");
                    assert_eq!(summary.model, "m3");
                    assert!(!summary.used_fallback);
                    assert_eq!(summary.failed_attempts.len(), 2);
                    break;
                }
                NextStep::Terminal(err) => panic!("unexpected: {}", err),
            }
        }
        assert_eq!(attempts, vec![1, 2, 3]);
        // Success resets the failures recorded earlier in the session
        assert_provider_state(&manager.snapshot(), "A", ProviderStatus::Healthy, 0);
    }

    #[test]
    fn test_model_classes_route_independently() {
        let manager =
            ProviderManager::from_config(&ConfigFactory::full(FallbackStrategy::Priority)).unwrap();

        for (name, expected) in [
            ("claude-3-opus-20240229", "openrouter-big"),
            ("claude-3-5-sonnet-20241022", "openrouter-middle"),
            ("claude-3-5-haiku-20241022", "openrouter-small"),
            ("gpt-4o", "openrouter-big"),
        ] {
            let selection = manager.select_initial(ModelType::classify(name)).unwrap();
            assert_eq!(selection.model, expected, "{}", name);
        }
    }

    #[test]
    fn test_round_robin_spreads_initial_selection() {
        let manager =
            ProviderManager::from_config(&ConfigFactory::full(FallbackStrategy::RoundRobin))
                .unwrap();

        let providers: HashSet<String> = (0..3)
            .map(|_| {
                manager
                    .select_initial(ModelType::Middle)
                    .unwrap()
                    .provider_name()
                    .to_string()
            })
            .collect();
        assert_eq!(providers.len(), 3);
    }

    #[test]
    fn test_no_provider_for_disabled_only_config() {
        let mut config = ConfigFactory::two_tier();
        for provider in &mut config.providers {
            provider.enabled = false;
        }
        let manager = ProviderManager::from_config(&config).unwrap();

        let err = manager.begin(ModelType::Small).unwrap_err();
        assert!(matches!(err, RouterError::NoProviderAvailable { .. }));
        assert!(manager.status().is_empty());
    }
}
