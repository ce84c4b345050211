//! Data Transfer Objects
//!
//! Response types for the API endpoints that are not passed through from the
//! backend. Telemetry responses are the backend's `QueryResult` as is.

use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy"
    pub status: String,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Crate version
    pub version: String,
    /// Widest time window accepted, in minutes
    pub max_time_diff_minutes: u32,
    /// Data kinds served, by slug
    pub kinds: Vec<String>,
}
