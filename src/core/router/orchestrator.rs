//! Per-request failover session
//!
//! A `FailoverSession` drives one logical request through same-provider model
//! retries and cross-provider fallback. The caller performs each dispatch and
//! reports the outcome; the session records it in the registry and answers
//! with the next step.
//!
//! Retry rules:
//! 1. A failed provider is retried with its next model while fewer attempts
//!    than it has models were made on it and it is still available.
//! 2. Otherwise it joins the tried set and the next available provider not in
//!    that set is selected.
//! 3. When nothing is left the session ends with `AllProvidersExhausted`.
//!
//! The tried set only grows and the provider set is finite, so a session
//! dispatches at most the sum of model counts of the providers it tried.

use super::error::{DispatchError, FailedAttempt, RouterError};
use super::model_type::ModelType;
use super::provider_state::ProviderState;
use super::registry::{ProviderRegistry, record_provider_failure, record_provider_success};
use super::selection::Selection;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Span, error, info, info_span, warn};
use uuid::Uuid;

/// A provider/model pair to dispatch to
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Provider state captured from the session's registry snapshot
    pub provider: Arc<ProviderState>,
    /// Concrete model name
    pub model: String,
    /// Dispatch number within the session, starting at 1
    pub attempt: u32,
}

impl Candidate {
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn from_selection(selection: Selection, attempt: u32) -> Self {
        Self {
            provider: selection.provider,
            model: selection.model,
            attempt,
        }
    }
}

/// Outcome of one dispatch, as reported by the caller
#[derive(Debug, Clone)]
pub enum AttemptOutcome {
    Success,
    Failure(DispatchError),
}

/// Summary of a session that ended in success
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    pub request_id: Uuid,
    /// Provider that served the request
    pub provider: String,
    /// Model that served the request
    pub model: String,
    /// Total dispatches, including the successful one
    pub attempts: u32,
    /// Whether the serving provider differs from the initial one
    pub used_fallback: bool,
    /// Failures before the success, in order
    pub failed_attempts: Vec<FailedAttempt>,
    pub latency_us: u64,
}

/// What the caller should do next
#[derive(Debug)]
pub enum NextStep {
    /// The request succeeded
    Done(ExecutionSummary),
    /// Dispatch again with this candidate
    Retry(Candidate),
    /// The request failed for good
    Terminal(RouterError),
}

/// How a session ended
#[derive(Debug, Clone)]
enum SessionEnd {
    Served(ExecutionSummary),
    Failed(RouterError),
}

/// State of one logical request
#[derive(Debug)]
pub struct FailoverSession {
    registry: Arc<ProviderRegistry>,
    model_type: ModelType,
    request_id: Uuid,
    tried_providers: HashSet<String>,
    same_provider_attempts: usize,
    failed_attempts: Vec<FailedAttempt>,
    dispatched: u32,
    started_at: Instant,
    span: Span,
    ended: Option<SessionEnd>,
}

impl FailoverSession {
    /// Start a session and select the first candidate
    ///
    /// Fails with `NoProviderAvailable` when no available provider has a model
    /// of the type.
    pub fn begin(
        registry: Arc<ProviderRegistry>,
        model_type: ModelType,
    ) -> Result<(Self, Candidate), RouterError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("failover", %request_id, %model_type);

        let selection = {
            let _enter = span.enter();
            let now = registry.now();
            match registry.select_initial(model_type, now) {
                Some(selection) => selection,
                None => {
                    error!("No provider available");
                    return Err(RouterError::NoProviderAvailable { model_type });
                }
            }
        };

        let session = Self {
            registry,
            model_type,
            request_id,
            tried_providers: HashSet::new(),
            same_provider_attempts: 0,
            failed_attempts: Vec::new(),
            dispatched: 1,
            started_at: Instant::now(),
            span,
            ended: None,
        };
        Ok((session, Candidate::from_selection(selection, 1)))
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Number of dispatches handed out so far
    pub fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Providers exhausted so far
    pub fn tried_providers(&self) -> &HashSet<String> {
        &self.tried_providers
    }

    /// Whether the session reached `Done` or `Terminal`
    pub fn is_finished(&self) -> bool {
        self.ended.is_some()
    }

    /// Record the outcome of dispatching `candidate` and decide the next step
    ///
    /// Once the session has ended, further outcomes are not recorded and the
    /// final step is returned again.
    pub fn report_outcome(&mut self, candidate: Candidate, outcome: AttemptOutcome) -> NextStep {
        if let Some(end) = &self.ended {
            let _enter = self.span.enter();
            warn!(
                provider = %candidate.provider_name(),
                model = %candidate.model,
                "Outcome reported after the session ended, ignoring"
            );
            return match end {
                SessionEnd::Served(summary) => NextStep::Done(summary.clone()),
                SessionEnd::Failed(err) => NextStep::Terminal(err.clone()),
            };
        }

        match outcome {
            AttemptOutcome::Success => NextStep::Done(self.complete(candidate)),
            AttemptOutcome::Failure(error) => match self.fail(candidate, error) {
                Ok(next) => NextStep::Retry(next),
                Err(err) => NextStep::Terminal(err),
            },
        }
    }

    /// Record a successful dispatch and close the session
    pub(crate) fn complete(&mut self, candidate: Candidate) -> ExecutionSummary {
        let _enter = self.span.enter();
        let now = self.registry.now();

        record_provider_success(&candidate.provider, now);
        let latency_us = self.started_at.elapsed().as_micros() as u64;
        info!(
            provider = %candidate.provider_name(),
            model = %candidate.model,
            attempts = self.dispatched,
            latency_us,
            "Request served"
        );

        let summary = ExecutionSummary {
            request_id: self.request_id,
            provider: candidate.provider_name().to_string(),
            model: candidate.model,
            attempts: self.dispatched,
            used_fallback: !self.tried_providers.is_empty(),
            failed_attempts: std::mem::take(&mut self.failed_attempts),
            latency_us,
        };
        self.ended = Some(SessionEnd::Served(summary.clone()));
        summary
    }

    /// Record a failed dispatch and select the next candidate
    ///
    /// Returns `AllProvidersExhausted` when no candidate remains.
    pub(crate) fn fail(
        &mut self,
        candidate: Candidate,
        error: DispatchError,
    ) -> Result<Candidate, RouterError> {
        let span = self.span.clone();
        let _enter = span.enter();
        let now = self.registry.now();

        let provider = &candidate.provider;
        warn!(
            provider = %provider.name(),
            model = %candidate.model,
            error = %error,
            "Dispatch failed"
        );
        record_provider_failure(provider, now);
        self.failed_attempts.push(FailedAttempt {
            provider: provider.name().to_string(),
            model: candidate.model.clone(),
            error: error.clone(),
        });

        self.same_provider_attempts += 1;
        let model_count = provider.models(self.model_type).len();
        if self.same_provider_attempts < model_count && provider.is_available(now) {
            if let Some(selection) =
                self.registry
                    .select_next_model_same_provider(provider.name(), self.model_type, now)
            {
                warn!(
                    provider = %provider.name(),
                    model = %selection.model,
                    "Trying next model on same provider"
                );
                return Ok(self.next_candidate(selection));
            }
        }

        self.tried_providers.insert(provider.name().to_string());
        self.same_provider_attempts = 0;

        if let Some(selection) =
            self.registry
                .select_fallback(self.model_type, &self.tried_providers, now)
        {
            warn!(
                from = %provider.name(),
                to = %selection.provider_name(),
                model = %selection.model,
                "Switching to fallback provider"
            );
            return Ok(self.next_candidate(selection));
        }

        error!(
            attempts = self.failed_attempts.len(),
            last_error = %error,
            "All providers exhausted"
        );
        let err = RouterError::AllProvidersExhausted {
            model_type: self.model_type,
            last_error: error,
            attempts: std::mem::take(&mut self.failed_attempts),
        };
        self.ended = Some(SessionEnd::Failed(err.clone()));
        Err(err)
    }

    fn next_candidate(&mut self, selection: Selection) -> Candidate {
        self.dispatched += 1;
        Candidate::from_selection(selection, self.dispatched)
    }
}
