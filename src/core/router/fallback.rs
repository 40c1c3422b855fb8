//! Execution result types

use uuid::Uuid;

/// Execution result with metadata
///
/// Contains the value of a successful dispatch along with which provider and
/// model served it, how many dispatches were made, and whether the request
/// fell back to another provider.
///
/// # Type Parameters
///
/// * `T` - The type of the result value
#[derive(Debug, Clone)]
pub struct ExecutionResult<T> {
    /// The successful result value
    pub result: T,
    /// Provider that served the request
    pub provider: String,
    /// Model that served the request
    pub model: String,
    /// Total dispatches across same-provider retries and fallbacks
    pub attempts: u32,
    /// Whether a provider other than the initial one served the request
    pub used_fallback: bool,
    /// Total execution latency in microseconds (including retries)
    pub latency_us: u64,
    /// Request id of the failover session
    pub request_id: Uuid,
}
