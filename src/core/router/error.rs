//! Router error types
//!
//! This module defines the terminal failures of a routing session and the
//! dispatch errors callers report back into it.

use super::model_type::ModelType;
use serde::Serialize;
use std::fmt;

/// Classification of a failed outbound call
///
/// Every kind is treated as transient by the failover session: any reported
/// failure triggers the retry/fallback sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchErrorKind {
    /// Rate limit (429)
    RateLimit,
    /// Upstream 5xx
    ServerError,
    /// Request or gateway timeout (408, 504, or local deadline)
    Timeout,
    /// Connection-level failure
    Network,
    /// Authentication rejected (401, 403)
    Authentication,
    /// Other 4xx
    InvalidRequest,
    /// Anything else
    Other,
}

impl DispatchErrorKind {
    /// Map an HTTP status code to an error kind
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => DispatchErrorKind::RateLimit,
            401 | 403 => DispatchErrorKind::Authentication,
            408 | 504 => DispatchErrorKind::Timeout,
            500..=599 => DispatchErrorKind::ServerError,
            400..=499 => DispatchErrorKind::InvalidRequest,
            _ => DispatchErrorKind::Other,
        }
    }
}

/// Error reported by the caller after a failed dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub struct DispatchError {
    /// Error classification
    pub kind: DispatchErrorKind,
    /// HTTP status, when the failure came from an HTTP response
    pub status: Option<u16>,
    /// Human-readable detail
    pub message: String,
}

impl DispatchError {
    /// Create a dispatch error of the given kind
    pub fn new(kind: DispatchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// Create a dispatch error from an HTTP status code
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: DispatchErrorKind::from_status(status),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::Timeout, message)
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(DispatchErrorKind::Network, message)
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{:?} ({}): {}", self.kind, status, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

/// One failed attempt in a failover chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAttempt {
    /// Provider that was tried
    pub provider: String,
    /// Concrete model that was tried
    pub model: String,
    /// Reported error
    pub error: DispatchError,
}

/// Router error types
///
/// Only these two failures ever leave a failover session; transient dispatch
/// errors are absorbed by the retry/fallback sequence.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouterError {
    /// No enabled, available provider has a model of the requested type
    #[error("No provider available for {model_type} models")]
    NoProviderAvailable {
        /// Requested model type
        model_type: ModelType,
    },

    /// Every candidate was tried through all of its models
    #[error(
        "All providers exhausted for {model_type} models after {} attempt(s); last error: {last_error}",
        .attempts.len()
    )]
    AllProvidersExhausted {
        /// Requested model type
        model_type: ModelType,
        /// Error of the final attempt
        last_error: DispatchError,
        /// Every failed attempt, in order
        attempts: Vec<FailedAttempt>,
    },
}

impl RouterError {
    /// Model type the failed request was classified as
    pub fn model_type(&self) -> ModelType {
        match self {
            RouterError::NoProviderAvailable { model_type }
            | RouterError::AllProvidersExhausted { model_type, .. } => *model_type,
        }
    }

    /// Failed attempts carried by the error (empty for `NoProviderAvailable`)
    pub fn attempts(&self) -> &[FailedAttempt] {
        match self {
            RouterError::NoProviderAvailable { .. } => &[],
            RouterError::AllProvidersExhausted { attempts, .. } => attempts,
        }
    }
}
