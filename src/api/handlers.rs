//! HTTP endpoint handlers
//!
//! Each handler is a thin pass-through to one `AppState` command.

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use crate::{
    error::WorkoutError,
    state::{AppState, CommandOutcome},
    timer::{TimerConfig, TimerId},
    workout::WorkoutSnapshot,
};
use super::responses::{ApiResponse, HealthResponse};

type ApiResult = (StatusCode, Json<ApiResponse>);

fn rejection(state: &AppState, error: WorkoutError) -> ApiResult {
    let status = match error {
        WorkoutError::InvalidConfig(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WorkoutError::NotEditable => StatusCode::CONFLICT,
        WorkoutError::UnknownTimer(_) => StatusCode::NOT_FOUND,
    };
    (status, Json(ApiResponse::rejected(error.to_string(), state.snapshot())))
}

fn outcome(outcome: CommandOutcome, done: &str, noop: &str) -> ApiResult {
    let response = if outcome.changed {
        ApiResponse::ok(done.to_string(), outcome.snapshot)
    } else {
        ApiResponse::unchanged(noop.to_string(), outcome.snapshot)
    };
    (StatusCode::OK, Json(response))
}

/// Handle GET /workout - Current workout snapshot
pub async fn workout_handler(State(state): State<Arc<AppState>>) -> Json<WorkoutSnapshot> {
    Json(state.snapshot())
}

/// Handle POST /timers - Add a timer to the workout
pub async fn add_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<TimerConfig>,
) -> ApiResult {
    match state.add_timer(config) {
        Ok((id, snapshot)) => {
            info!("Add endpoint called - timer {} added", id);
            let response = ApiResponse::ok("Timer added".to_string(), snapshot).with_timer_id(id);
            (StatusCode::CREATED, Json(response))
        }
        Err(e) => rejection(&state, e),
    }
}

/// Handle DELETE /timers/:id - Remove a timer from the workout
pub async fn remove_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult {
    let id = TimerId::from(id);
    match state.remove_timer(&id) {
        Ok(snapshot) => {
            info!("Remove endpoint called - timer {} removed", id);
            let response = ApiResponse::ok("Timer removed".to_string(), snapshot).with_timer_id(id);
            (StatusCode::OK, Json(response))
        }
        Err(e) => rejection(&state, e),
    }
}

/// Handle POST /workout/start - Start or resume the workout
pub async fn start_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    outcome(state.start(), "Workout started", "Workout is already running or has no timers")
}

/// Handle POST /workout/pause - Pause the running timer
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    outcome(state.pause(), "Workout paused", "No running timer to pause")
}

/// Handle POST /workout/resume - Resume the paused timer
pub async fn resume_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    outcome(state.resume(), "Workout resumed", "No paused timer to resume")
}

/// Handle POST /workout/reset - Reset every timer
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    outcome(state.reset(), "Workout reset", "Workout already reset")
}

/// Handle POST /workout/skip - Abandon the active timer and move on
pub async fn skip_handler(State(state): State<Arc<AppState>>) -> ApiResult {
    outcome(state.skip(), "Timer skipped", "No active timer to skip")
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (last_action, last_action_time) = state.get_last_action();
    Json(HealthResponse::ok(state.get_uptime(), last_action, last_action_time))
}
