//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    state::{AppState, ExerciseDraft},
};
use super::responses::{
    EditRequest, ExercisesResponse, HealthResponse, MuteResponse, StatusResponse, TimerResponse,
};

/// Log an error at a level matching its status and map it to that status
fn reject(context: &str, e: AppError) -> StatusCode {
    let status = e.status_code();
    if status.is_server_error() {
        error!("{}: {}", context, e);
    } else {
        warn!("{}: {}", context, e);
    }
    status
}

/// Handle GET /exercises - List exercises in order
pub async fn list_exercises_handler(State(state): State<Arc<AppState>>) -> Result<Json<ExercisesResponse>, StatusCode> {
    let exercises = state.exercises().map_err(|e| reject("Failed to list exercises", e))?;
    Ok(Json(ExercisesResponse::ok(
        format!("{} exercises", exercises.len()),
        exercises,
    )))
}

/// Handle POST /exercises - Append an exercise from the add form
pub async fn add_exercise_handler(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<ExerciseDraft>,
) -> Result<Json<ExercisesResponse>, StatusCode> {
    let added = state.add_exercise(draft).map_err(|e| reject("Failed to add exercise", e))?;
    let exercises = state.exercises().map_err(|e| reject("Failed to list exercises", e))?;

    match added {
        Some(index) => {
            info!("Add endpoint called - exercise added at index {}", index);
            Ok(Json(ExercisesResponse::ok(
                format!("Exercise added at index {}", index),
                exercises,
            )))
        }
        None => Ok(Json(ExercisesResponse::ignored(
            "Exercise form incomplete, nothing added".to_string(),
            exercises,
        ))),
    }
}

/// Handle PATCH /exercises/:index - Edit one field of an exercise
pub async fn edit_exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
    Json(request): Json<EditRequest>,
) -> Result<Json<ExercisesResponse>, StatusCode> {
    let value = request.value.unwrap_or_default();
    state
        .edit_exercise(index, request.field, &value)
        .map_err(|e| reject("Failed to edit exercise", e))?;
    let exercises = state.exercises().map_err(|e| reject("Failed to list exercises", e))?;
    Ok(Json(ExercisesResponse::ok(
        format!("Exercise {} field {} updated", index, request.field),
        exercises,
    )))
}

/// Handle DELETE /exercises/:index - Remove an exercise
pub async fn remove_exercise_handler(
    State(state): State<Arc<AppState>>,
    Path(index): Path<usize>,
) -> Result<Json<ExercisesResponse>, StatusCode> {
    let removed = state
        .remove_exercise(index)
        .map_err(|e| reject("Failed to remove exercise", e))?;
    let exercises = state.exercises().map_err(|e| reject("Failed to list exercises", e))?;
    Ok(Json(ExercisesResponse::ok(
        format!("Removed {}", removed.exercise_name),
        exercises,
    )))
}

/// Handle POST /timer/start - Start, resume or restart the timer
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    let timer = state.start_timer().map_err(|e| reject("Failed to start timer", e))?;
    Ok(Json(TimerResponse::new("Timer running", timer)))
}

/// Handle POST /timer/stop - Pause the timer
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    let timer = state.stop_timer().map_err(|e| reject("Failed to stop timer", e))?;
    Ok(Json(TimerResponse::new("Timer stopped", timer)))
}

/// Handle POST /timer/continue - Move on to the next exercise
pub async fn continue_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerResponse>, StatusCode> {
    let timer = state
        .continue_exercise()
        .map_err(|e| reject("Failed to continue to next exercise", e))?;
    Ok(Json(TimerResponse::new("Ready for next exercise", timer)))
}

/// Handle POST /mute - Toggle audio cues
pub async fn mute_handler(State(state): State<Arc<AppState>>) -> Result<Json<MuteResponse>, StatusCode> {
    let muted = state.toggle_mute().map_err(|e| reject("Failed to toggle mute", e))?;
    Ok(Json(MuteResponse {
        muted,
        timestamp: Utc::now(),
    }))
}

/// Handle GET /status - Return the list, timer and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let exercises = state.exercises().map_err(|e| reject("Failed to list exercises", e))?;
    let timer = state.timer_snapshot().map_err(|e| reject("Failed to read timer state", e))?;

    Ok(Json(StatusResponse {
        exercises,
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
