//! Error types for workout commands and persistence.

use thiserror::Error;

use crate::timer::TimerId;

/// Reasons a workout command is refused.
///
/// These are policy refusals, not faults: the workout is left untouched and
/// the reason is reported back to whoever issued the command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkoutError {
    /// The submitted configuration cannot be run
    #[error("Invalid timer configuration: {0}")]
    InvalidConfig(String),

    /// The timer list cannot change while a timer is running or paused
    #[error("Workout is active; stop or reset it before editing timers")]
    NotEditable,

    /// No timer with this id exists in the workout
    #[error("Unknown timer: {0}")]
    UnknownTimer(TimerId),
}

/// Persistence gateway errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for workout commands
pub type Result<T, E = WorkoutError> = std::result::Result<T, E>;
