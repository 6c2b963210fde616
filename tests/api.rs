//! HTTP API tests.
//!
//! Requests go straight into the router with `oneshot`, no socket involved.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use rep_counter::{
    create_router,
    services::RecordingCueSink,
    state::AppState,
    store::{ExerciseStore, MemoryStorage, Storage, EXERCISES_KEY},
};

fn app_with(storage: MemoryStorage) -> Router {
    let state = AppState::new(
        ExerciseStore::load(Box::new(storage)),
        Arc::new(RecordingCueSink::new()),
        true,
        20554,
        "127.0.0.1".to_string(),
    );
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

fn squats() -> Value {
    json!({
        "exerciseName": "Squats",
        "reps": "12",
        "time": "4",
        "sets": "3",
        "breakTime": "45",
    })
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app_with(MemoryStorage::new());
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn fresh_storage_lists_default_exercise() {
    let app = app_with(MemoryStorage::new());
    let (status, body) = send(&app, "GET", "/exercises", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["exercises"],
        json!([{"exerciseName": "Smile Exercise", "reps": 10, "time": 30, "sets": 3, "breakTime": 60}])
    );
}

#[tokio::test]
async fn add_persists_and_incomplete_add_is_ignored() {
    let storage = MemoryStorage::new();
    let app = app_with(storage.clone());

    let (status, body) = send(&app, "POST", "/exercises", Some(squats())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["exercises"][1]["exerciseName"], "Squats");
    assert_eq!(body["exercises"][1]["reps"], 12);

    let (status, body) = send(&app, "POST", "/exercises", Some(json!({"exerciseName": "Lunges", "reps": "8"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ignored");
    assert_eq!(body["exercises"].as_array().unwrap().len(), 2);

    let stored: Value = serde_json::from_str(&storage.get(EXERCISES_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(stored.as_array().unwrap().len(), 2);
    assert_eq!(stored[1]["breakTime"], 45);
}

#[tokio::test]
async fn edit_validates_index_and_value() {
    let app = app_with(MemoryStorage::new());

    let (status, body) = send(&app, "PATCH", "/exercises/0", Some(json!({"field": "sets", "value": "5"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercises"][0]["sets"], 5);

    let (status, _) = send(&app, "PATCH", "/exercises/0", Some(json!({"field": "sets", "value": "five"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "PATCH", "/exercises/4", Some(json!({"field": "reps", "value": "1"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_everything_disables_the_timer() {
    let app = app_with(MemoryStorage::new());

    let (status, body) = send(&app, "DELETE", "/exercises/0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exercises"], json!([]));

    let (status, _) = send(&app, "DELETE", "/exercises/0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for path in ["/timer/start", "/timer/stop", "/timer/continue"] {
        let (status, _) = send(&app, "POST", path, None).await;
        assert_eq!(status, StatusCode::CONFLICT, "{}", path);
    }
}

#[tokio::test]
async fn timer_intents_report_state() {
    let app = app_with(MemoryStorage::new());

    let (status, body) = send(&app, "POST", "/timer/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "running_rep");
    assert_eq!(body["timer"]["current_rep"], 1);
    assert_eq!(body["timer"]["seconds_remaining_in_rep"], 30);
    assert_eq!(body["timer"]["current_exercise"]["exerciseName"], "Smile Exercise");

    let (status, _) = send(&app, "POST", "/timer/continue", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", "/timer/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["running"], false);
    assert_eq!(body["timer"]["phase"], "paused");
    assert_eq!(body["timer"]["on_break"], false);

    let (_, body) = send(&app, "POST", "/mute", None).await;
    assert_eq!(body["muted"], false);

    let (status, body) = send(&app, "GET", "/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["muted"], false);
    assert_eq!(body["timer"]["current_rep"], 1);
    assert_eq!(body["exercises"].as_array().unwrap().len(), 1);
}
