//! Execution driver for failover sessions
//!
//! Runs a caller-supplied dispatch function through a `FailoverSession` until
//! it succeeds or the session ends.

use super::error::{DispatchError, RouterError};
use super::fallback::ExecutionResult;
use super::model_type::ModelType;
use super::orchestrator::{Candidate, FailoverSession};
use super::registry::ProviderRegistry;
use std::future::Future;
use std::sync::Arc;

impl ProviderRegistry {
    /// Execute a request with same-provider retries and provider fallback
    ///
    /// `dispatch` performs the outbound call for one candidate. Every error it
    /// returns is recorded against the candidate's provider and triggers the
    /// next retry or fallback step.
    pub async fn execute<T, F, Fut>(
        self: &Arc<Self>,
        model_type: ModelType,
        dispatch: F,
    ) -> Result<ExecutionResult<T>, RouterError>
    where
        F: Fn(Candidate) -> Fut,
        Fut: Future<Output = Result<T, DispatchError>>,
    {
        let (mut session, mut candidate) = FailoverSession::begin(Arc::clone(self), model_type)?;

        loop {
            match dispatch(candidate.clone()).await {
                Ok(result) => {
                    let summary = session.complete(candidate);
                    return Ok(ExecutionResult {
                        result,
                        provider: summary.provider,
                        model: summary.model,
                        attempts: summary.attempts,
                        used_fallback: summary.used_fallback,
                        latency_us: summary.latency_us,
                        request_id: summary.request_id,
                    });
                }
                Err(err) => candidate = session.fail(candidate, err)?,
            }
        }
    }
}
