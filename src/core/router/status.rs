//! Health reporting types

use super::circuit_breaker::ProviderStatus;
use crate::config::models::ProviderModels;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Status of one provider, as surfaced to health endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderStatusReport {
    pub name: String,
    pub status: ProviderStatus,
    pub priority: u32,
    pub failure_count: u32,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    pub models: ProviderModels,
    pub total_requests: u64,
    pub success_requests: u64,
    pub fail_requests: u64,
}

/// Aggregate health over all providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    /// At least one provider is healthy
    Healthy,
    /// No provider is healthy
    Unhealthy,
}

impl OverallHealth {
    /// Healthy when any report is healthy
    pub fn from_reports(reports: &[ProviderStatusReport]) -> Self {
        if reports
            .iter()
            .any(|report| report.status == ProviderStatus::Healthy)
        {
            OverallHealth::Healthy
        } else {
            OverallHealth::Unhealthy
        }
    }
}

impl fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallHealth::Healthy => f.write_str("healthy"),
            OverallHealth::Unhealthy => f.write_str("unhealthy"),
        }
    }
}

/// Full health document
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallHealth,
    pub timestamp: DateTime<Utc>,
    pub providers: Vec<ProviderStatusReport>,
}
