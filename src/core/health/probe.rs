//! Health probe trait

use crate::core::router::{DispatchError, ProviderState};
use async_trait::async_trait;

/// Performs a synthetic call against a provider
///
/// Implementations own the transport. The router only decides whom to probe
/// and records the result.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Probe `provider` with `model`
    async fn probe(&self, provider: &ProviderState, model: &str) -> Result<(), DispatchError>;
}
