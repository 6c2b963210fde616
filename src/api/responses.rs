//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ExerciseDefinition, ExerciseField, TimerSnapshot};

/// Response for exercise list mutations and reads
#[derive(Debug, Clone, Serialize)]
pub struct ExercisesResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub exercises: Vec<ExerciseDefinition>,
}

impl ExercisesResponse {
    pub fn new(status: &str, message: String, exercises: Vec<ExerciseDefinition>) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            exercises,
        }
    }

    pub fn ok(message: String, exercises: Vec<ExerciseDefinition>) -> Self {
        Self::new("ok", message, exercises)
    }

    /// The request was understood but deliberately not acted on
    pub fn ignored(message: String, exercises: Vec<ExerciseDefinition>) -> Self {
        Self::new("ignored", message, exercises)
    }
}

/// Response for timer intents
#[derive(Debug, Clone, Serialize)]
pub struct TimerResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl TimerResponse {
    pub fn new(message: &str, timer: TimerSnapshot) -> Self {
        Self {
            message: message.to_string(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MuteResponse {
    pub muted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Full status: the list, the timer and server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub exercises: Vec<ExerciseDefinition>,
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `PATCH /exercises/:index`. `value` may be text or a number.
#[derive(Debug, Clone, Deserialize)]
pub struct EditRequest {
    pub field: ExerciseField,
    #[serde(deserialize_with = "crate::state::exercise::form_text")]
    pub value: Option<String>,
}
