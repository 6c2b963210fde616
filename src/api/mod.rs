//! HTTP API module
//!
//! One endpoint per user intent, plus status and health.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/exercises", get(list_exercises_handler).post(add_exercise_handler))
        .route(
            "/exercises/:index",
            patch(edit_exercise_handler).delete(remove_exercise_handler),
        )
        .route("/timer/start", post(start_handler))
        .route("/timer/stop", post(stop_handler))
        .route("/timer/continue", post(continue_handler))
        .route("/mute", post(mute_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
