//! Provider and model selection
//!
//! Selection walks the strategy-ordered list of available providers and takes
//! the first one that can hand out a model of the requested type. Taking a
//! model advances that provider's rotation cursor.

use super::model_type::ModelType;
use super::provider_state::ProviderState;
use super::registry::ProviderRegistry;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// A provider paired with the model it handed out
#[derive(Debug, Clone)]
pub struct Selection {
    pub provider: Arc<ProviderState>,
    pub model: String,
}

impl Selection {
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }
}

impl ProviderRegistry {
    /// Pick the provider and model for a new request
    pub fn select_initial(&self, model_type: ModelType, now: DateTime<Utc>) -> Option<Selection> {
        self.select_excluding(model_type, None, now)
    }

    /// Pick a provider and model, skipping providers already tried
    pub fn select_fallback(
        &self,
        model_type: ModelType,
        excluded: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Option<Selection> {
        self.select_excluding(model_type, Some(excluded), now)
    }

    /// Next model of the same provider
    ///
    /// `None` when the provider is unknown, disabled, unavailable at `now`, or
    /// has no models of the type.
    pub fn select_next_model_same_provider(
        &self,
        provider_name: &str,
        model_type: ModelType,
        now: DateTime<Utc>,
    ) -> Option<Selection> {
        let provider = self.get(provider_name)?;
        if !provider.is_available(now) {
            debug!(provider = %provider_name, "Provider unavailable for same-provider retry");
            return None;
        }

        let model = provider.next_model(model_type)?.to_string();
        debug!(
            provider = %provider_name,
            model = %model,
            model_type = %model_type,
            "Selected next model on same provider"
        );
        Some(Selection {
            provider: Arc::clone(provider),
            model,
        })
    }

    fn select_excluding(
        &self,
        model_type: ModelType,
        excluded: Option<&HashSet<String>>,
        now: DateTime<Utc>,
    ) -> Option<Selection> {
        let selection = self
            .available_providers(now)
            .into_iter()
            .filter(|p| excluded.is_none_or(|set| !set.contains(p.name())))
            .find_map(|provider| {
                let model = provider.next_model(model_type)?.to_string();
                Some(Selection { provider, model })
            });

        match &selection {
            Some(selection) => debug!(
                provider = %selection.provider_name(),
                model = %selection.model,
                model_type = %model_type,
                strategy = %self.strategy(),
                "Selected provider"
            ),
            None => debug!(model_type = %model_type, "No provider candidate"),
        }

        selection
    }
}
