//! Shared API request/response types used by both CLI and API server.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Message returned after a detection has been recorded.
pub const REPORTED_MESSAGE: &str = "Reported successfully";

/// Acknowledgement for `POST /report`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub success: bool,
    pub message: String,
}

impl ReportResponse {
    pub fn reported() -> Self {
        Self {
            success: true,
            message: REPORTED_MESSAGE.to_string(),
        }
    }
}

/// Aggregate counters returned by `GET /stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Distinct callers seen during the current UTC day.
    pub today_unique_ips: u64,
    /// Lifetime number of reported detections.
    pub total_detections: u64,
    /// The UTC day the daily figure refers to, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Usage information returned for any unrecognised route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    /// Route (`"METHOD /path"`) to a short description.
    pub endpoints: BTreeMap<String, String>,
    pub github: String,
}
