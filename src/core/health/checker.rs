//! Probing pass over a registry

use super::probe::HealthProbe;
use crate::core::router::registry::{record_provider_failure, record_provider_success};
use crate::core::router::{DispatchError, ProviderRegistry};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Probe every circuit-open provider whose recovery window has elapsed
///
/// A successful probe closes the circuit; a failed one is recorded as a
/// failure, which re-arms the recovery window. Each probe is bounded by the
/// provider's configured timeout. Returns the number of providers probed.
pub async fn run_probe_round(registry: &ProviderRegistry, probe: &dyn HealthProbe) -> usize {
    let now = registry.now();
    let due: Vec<_> = registry
        .providers()
        .iter()
        .filter(|p| p.breaker().is_due_for_probe(now))
        .cloned()
        .collect();

    if due.is_empty() {
        debug!("No providers due for a health probe");
        return 0;
    }

    let mut probed = 0;
    for provider in due {
        let Some(model) = provider.probe_model() else {
            debug!(provider = %provider.name(), "Skipping probe, provider has no models");
            continue;
        };
        probed += 1;

        let timeout = Duration::from_secs(provider.config().timeout);
        let result = match tokio::time::timeout(timeout, probe.probe(&provider, model)).await {
            Ok(result) => result,
            Err(_) => Err(DispatchError::timeout(format!(
                "health probe timed out after {}s",
                timeout.as_secs()
            ))),
        };

        let now = registry.now();
        match result {
            Ok(()) => {
                info!(provider = %provider.name(), model, "Health probe succeeded");
                record_provider_success(&provider, now);
            }
            Err(e) => {
                warn!(provider = %provider.name(), model, error = %e, "Health probe failed");
                record_provider_failure(&provider, now);
            }
        }
    }

    probed
}
