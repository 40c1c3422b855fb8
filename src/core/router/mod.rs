//! Provider selection and failover
//!
//! This module decides, for every request, which provider and which concrete
//! model should serve it, and drives the retry/fallback sequence when
//! dispatches fail.
//!
//! ## Module Structure
//!
//! - `model_type` - Big/Middle/Small request classes
//! - `circuit_breaker` - Per-provider health state machine
//! - `provider_state` - Provider runtime state and model rotation cursors
//! - `registry` - Provider registry, availability filtering and recording
//! - `strategy_impl` - Priority, round-robin and random ordering
//! - `selection` - Initial, fallback and same-provider selection
//! - `orchestrator` - Per-request failover session
//! - `execute_impl` - Async execution driver over a session
//! - `fallback` - Execution result metadata
//! - `manager` - Owned entry point with atomic reload and health probing
//! - `status` - Health reporting types
//! - `clock` - Injectable time source
//! - `error` - Dispatch and router error types

pub mod circuit_breaker;
pub mod clock;
pub mod error;
pub mod execute_impl;
pub mod fallback;
pub mod manager;
pub mod model_type;
pub mod orchestrator;
pub mod provider_state;
pub mod registry;
pub mod selection;
pub mod status;
pub mod strategy_impl;

#[cfg(test)]
mod tests;

pub use circuit_breaker::{BreakerSnapshot, CircuitBreaker, ProviderStatus};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{DispatchError, DispatchErrorKind, FailedAttempt, RouterError};
pub use fallback::ExecutionResult;
pub use manager::ProviderManager;
pub use model_type::ModelType;
pub use orchestrator::{AttemptOutcome, Candidate, ExecutionSummary, FailoverSession, NextStep};
pub use provider_state::ProviderState;
pub use registry::ProviderRegistry;
pub use selection::Selection;
pub use status::{HealthReport, OverallHealth, ProviderStatusReport};
