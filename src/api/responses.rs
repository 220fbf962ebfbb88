//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{timer::TimerId, workout::WorkoutSnapshot};

/// API response structure for every workout command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// `ok`, `unchanged` or `rejected`
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer_id: Option<TimerId>,
    pub workout: WorkoutSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, workout: WorkoutSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            timer_id: None,
            workout,
        }
    }

    /// The command took effect
    pub fn ok(message: String, workout: WorkoutSnapshot) -> Self {
        Self::new("ok", message, workout)
    }

    /// The command was not legal in the current state and changed nothing
    pub fn unchanged(message: String, workout: WorkoutSnapshot) -> Self {
        Self::new("unchanged", message, workout)
    }

    /// The command was refused by workout policy
    pub fn rejected(message: String, workout: WorkoutSnapshot) -> Self {
        Self::new("rejected", message, workout)
    }

    pub fn with_timer_id(mut self, id: TimerId) -> Self {
        self.timer_id = Some(id);
        self
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok(uptime: String, last_action: Option<String>, last_action_time: Option<DateTime<Utc>>) -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime,
            last_action,
            last_action_time,
        }
    }
}
