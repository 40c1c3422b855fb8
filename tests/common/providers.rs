//! Scripted collaborators for tests
//!
//! `ScriptedProbe` stands in for the transport a real health probe would
//! use: it records every call and answers from a fixed per-provider script.

use async_trait::async_trait;
use parking_lot::Mutex;
use provider_failover::{DispatchError, HealthProbe, ProviderState};
use std::collections::HashSet;

/// Health probe that fails for a configured set of providers
#[derive(Debug, Default)]
pub struct ScriptedProbe {
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make probes of `provider` fail (or succeed again)
    pub fn set_failing(&self, provider: &str, failing: bool) {
        let mut set = self.failing.lock();
        if failing {
            set.insert(provider.to_string());
        } else {
            set.remove(provider);
        }
    }

    /// Recorded (provider, model) calls
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl HealthProbe for ScriptedProbe {
    async fn probe(&self, provider: &ProviderState, model: &str) -> Result<(), DispatchError> {
        self.calls
            .lock()
            .push((provider.name().to_string(), model.to_string()));
        if self.failing.lock().contains(provider.name()) {
            Err(DispatchError::from_status(503, "probe failed"))
        } else {
            Ok(())
        }
    }
}
