//! Validation trait definition

/// Validation trait for configuration structures
///
/// Errors are human-readable messages naming the offending field; callers
/// wrap them into `GatewayError::Validation`.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
