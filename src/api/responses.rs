//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CountdownState, TimeModel};

/// Raw text fields of the start form.
///
/// Kept as strings so malformed input can fall back to zero instead of
/// rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeInput {
    #[serde(default)]
    pub hours: String,
    #[serde(default)]
    pub minutes: String,
    #[serde(default)]
    pub seconds: String,
}

/// API response structure for control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub state: CountdownState,
    pub display: String,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, state: CountdownState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display: state.display(),
            state,
        }
    }

    /// Response for a freshly started countdown
    pub fn started(requested: TimeModel, state: CountdownState) -> Self {
        Self::new(
            "running".to_string(),
            format!("Countdown started for {}", requested),
            state,
        )
    }

    /// Response for a stopped countdown
    pub fn stopped(state: CountdownState) -> Self {
        Self::new("stopped".to_string(), "Countdown stopped".to_string(), state)
    }

    /// Response for a reset countdown
    pub fn reset(state: CountdownState) -> Self {
        Self::new("reset".to_string(), "Countdown reset".to_string(), state)
    }
}

/// Status response with the live display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: CountdownState,
    pub display: String,
    pub running: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
