//! Error handling integration tests

#[cfg(test)]
mod tests {
    use provider_failover::{
        DispatchError, DispatchErrorKind, GatewayError, ModelType, RouterError,
    };
    use provider_failover::core::router::FailedAttempt;

    #[test]
    fn test_dispatch_error_classification() {
        let cases = [
            (429, DispatchErrorKind::RateLimit),
            (401, DispatchErrorKind::Authentication),
            (403, DispatchErrorKind::Authentication),
            (408, DispatchErrorKind::Timeout),
            (504, DispatchErrorKind::Timeout),
            (500, DispatchErrorKind::ServerError),
            (502, DispatchErrorKind::ServerError),
            (400, DispatchErrorKind::InvalidRequest),
            (404, DispatchErrorKind::InvalidRequest),
            (302, DispatchErrorKind::Other),
        ];
        for (status, kind) in cases {
            assert_eq!(DispatchError::from_status(status, "x").kind, kind, "{}", status);
        }
    }

    #[test]
    fn test_router_error_messages() {
        let err = RouterError::NoProviderAvailable {
            model_type: ModelType::Middle,
        };
        assert_eq!(err.to_string(), "No provider available for middle models");

        let last = DispatchError::from_status(503, "overloaded");
        let err = RouterError::AllProvidersExhausted {
            model_type: ModelType::Big,
            last_error: last.clone(),
            attempts: vec![FailedAttempt {
                provider: "A".to_string(),
                model: "m1".to_string(),
                error: last,
            }],
        };
        let message = err.to_string();
        assert!(message.contains("big"));
        assert!(message.contains("1 attempt"));
        assert!(message.contains("overloaded"));
    }

    #[test]
    fn test_router_error_converts_to_gateway_error() {
        let err: GatewayError = RouterError::NoProviderAvailable {
            model_type: ModelType::Small,
        }
        .into();
        assert!(matches!(err, GatewayError::Router(_)));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_dispatch_error_serializes() {
        let json = serde_json::to_value(DispatchError::from_status(429, "slow down")).unwrap();
        assert_eq!(json["kind"], "rate_limit");
        assert_eq!(json["status"], 429);
        assert_eq!(json["message"], "slow down");
    }
}
