use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use futures::StreamExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use countdown::{create_router, AppState, CountdownState, TimeModel};

fn setup() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), Duration::from_secs(1)));
    let app = create_router(Arc::clone(&state));
    (state, app)
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request(method, uri)).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test(start_paused = true)]
async fn test_health() {
    let (_, app) = setup();
    let (status, body) = send(&app, "GET", "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test(start_paused = true)]
async fn test_initial_status_is_finished() {
    let (_, app) = setup();
    let (status, body) = send(&app, "GET", "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], json!({ "state": "finished" }));
    assert_eq!(body["display"], "0 : 0 : 0");
    assert_eq!(body["running"], false);
    assert_eq!(body["last_action"], Value::Null);
}

#[tokio::test(start_paused = true)]
async fn test_start_runs_to_completion() {
    let (state, app) = setup();
    let mut events = state.subscribe();

    let (status, body) = send(&app, "POST", "/start?hours=0&minutes=0&seconds=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "running");
    assert_eq!(body["message"], "Countdown started for 0 : 0 : 2");

    assert_eq!(events.recv().await.unwrap(), CountdownState::ticking(TimeModel::new(0, 0, 1)));
    assert_eq!(events.recv().await.unwrap(), CountdownState::ticking(TimeModel::zero()));
    assert_eq!(events.recv().await.unwrap(), CountdownState::Finished);

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["state"]["state"], "finished");
    assert_eq!(body["running"], false);
    assert_eq!(body["last_action"], "start");
}

#[tokio::test(start_paused = true)]
async fn test_malformed_fields_default_to_zero() {
    let (state, app) = setup();
    let mut events = state.subscribe();

    let (status, body) = send(&app, "POST", "/start?hours=abc&minutes=&seconds=-4").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Countdown started for 0 : 0 : 0");

    assert_eq!(events.recv().await.unwrap(), CountdownState::ticking(TimeModel::zero()));
    assert_eq!(events.recv().await.unwrap(), CountdownState::Finished);
}

#[tokio::test(start_paused = true)]
async fn test_missing_fields_default_to_zero() {
    let (_, app) = setup();
    let (status, body) = send(&app, "POST", "/start").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Countdown started for 0 : 0 : 0");
}

#[tokio::test(start_paused = true)]
async fn test_out_of_range_minutes_carry_into_hours() {
    let (state, app) = setup();
    let (_, body) = send(&app, "POST", "/start?minutes=90").await;

    assert_eq!(body["message"], "Countdown started for 1 : 30 : 0");

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(state.current_state(), CountdownState::ticking(TimeModel::new(1, 29, 59)));
}

#[tokio::test(start_paused = true)]
async fn test_stop_without_countdown_keeps_state() {
    let (_, app) = setup();
    let (status, body) = send(&app, "POST", "/stop").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["state"], json!({ "state": "finished" }));
}

#[tokio::test(start_paused = true)]
async fn test_stop_freezes_display() {
    let (state, app) = setup();
    send(&app, "POST", "/start?seconds=10").await;
    tokio::time::sleep(Duration::from_millis(3500)).await;

    let (_, body) = send(&app, "POST", "/stop").await;
    assert_eq!(body["display"], "0 : 0 : 7");

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(state.current_state().display(), "0 : 0 : 7");
}

#[tokio::test(start_paused = true)]
async fn test_reset_publishes_zero_tick() {
    let (_, app) = setup();
    send(&app, "POST", "/start?minutes=5").await;
    tokio::time::sleep(Duration::from_millis(2500)).await;

    let (status, body) = send(&app, "POST", "/reset").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["state"],
        json!({ "state": "ticking", "remaining": { "hours": 0, "minutes": 0, "seconds": 0 } })
    );
    assert_eq!(body["display"], "0 : 0 : 0");

    let (_, body) = send(&app, "GET", "/status").await;
    assert_eq!(body["state"]["state"], "ticking");
    assert_eq!(body["running"], false);
    assert_eq!(body["last_action"], "reset");
}

#[tokio::test(start_paused = true)]
async fn test_event_stream_starts_with_current_state() {
    let (_, app) = setup();
    let response = app.clone().oneshot(request("GET", "/events")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut body = response.into_body().into_data_stream();

    let first = body.next().await.unwrap().unwrap();
    let first = String::from_utf8_lossy(&first);
    assert!(first.contains("event: finish"));
    assert!(first.contains(r#""state":"finished""#));

    send(&app, "POST", "/reset").await;

    let next = body.next().await.unwrap().unwrap();
    let next = String::from_utf8_lossy(&next);
    assert!(next.contains("event: tick"));
    assert!(next.contains(r#""state":"ticking""#));
}
