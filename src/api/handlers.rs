//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{
    state::{AppState, CountdownState},
    utils::parse_time_field,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse, TimeInput};

/// Handle POST /start - Start a countdown from the hours/minutes/seconds fields
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Query(input): Query<TimeInput>,
) -> Json<ApiResponse> {
    let hours = parse_time_field(&input.hours);
    let minutes = parse_time_field(&input.minutes);
    let seconds = parse_time_field(&input.seconds);

    let requested = state.start_timer(hours, minutes, seconds);
    info!("Start endpoint called - countdown of {}", requested);

    Json(ApiResponse::started(requested, state.current_state()))
}

/// Handle POST /stop - Stop the running countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.stop_timer();
    info!("Stop endpoint called");
    Json(ApiResponse::stopped(state.current_state()))
}

/// Handle POST /reset - Stop the countdown and zero the display
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let reset = state.reset_timer();
    info!("Reset endpoint called");
    Json(ApiResponse::reset(reset))
}

/// Handle GET /status - Return the current countdown status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let current = state.current_state();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        state: current,
        display: current.display(),
        running: state.is_running(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /events - Stream the current state followed by every update
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let (current, updates_rx) = state.subscribe_with_current();

    let updates = stream::unfold(updates_rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(update) => return Some((update, rx)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Event stream lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    let events = stream::once(async move { current })
        .chain(updates)
        .map(state_event);

    Sse::new(events).keep_alive(KeepAlive::default())
}

fn state_event(state: CountdownState) -> Result<Event, axum::Error> {
    let name = match state {
        CountdownState::Ticking { .. } => "tick",
        CountdownState::Finished => "finish",
    };
    Event::default().event(name).json_data(state)
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
