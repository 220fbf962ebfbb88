//! HTTP API module
//!
//! The command surface a front end uses to drive the workout.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/workout", get(workout_handler))
        .route("/workout/start", post(start_handler))
        .route("/workout/pause", post(pause_handler))
        .route("/workout/resume", post(resume_handler))
        .route("/workout/reset", post(reset_handler))
        .route("/workout/skip", post(skip_handler))
        .route("/timers", post(add_timer_handler))
        .route("/timers/:id", delete(remove_timer_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
