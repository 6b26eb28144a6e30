//! HTTP endpoint handlers
//!
//! Operator (controller) endpoints mutate the store; the stage display only
//! reads frames. Both go through the same `SessionStore`.

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::info;

use super::responses::{
    ApiError, ApiResponse, CreateSessionRequest, DurationRequest, HealthResponse, StatusResponse,
};
use crate::{
    render::DisplayFrame,
    state::{
        AppState, DisplayPatch, MessagesPatch, Session, SessionPatch, StoreSnapshot, TimerPatch,
    },
};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET /status - Store and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.store.snapshot();
    let active = state.store.active_session();
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        session_count: snapshot.sessions.len(),
        active_session_id: snapshot.active_session_id,
        timer_running: active.as_ref().is_some_and(|s| s.timer.is_running),
        timer_remaining_seconds: active.as_ref().map(|s| s.timer.remaining_seconds()),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

// ── Sessions ─────────────────────────────────────────────────────────

/// Handle GET /sessions - All sessions and the active pointer
pub async fn list_sessions_handler(State(state): State<Arc<AppState>>) -> Json<StoreSnapshot> {
    Json(state.store.snapshot())
}

/// Handle POST /sessions - Create a session and make it active
pub async fn create_session_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), ApiError> {
    let id = state.store.create_session(&request.name)?;
    state.record_action("create-session");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            format!("Session {} created", id),
            state.store.session(&id),
        )),
    ))
}

/// Handle PATCH /sessions/:id - Rename or partially update a session
pub async fn update_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<SessionPatch>,
) -> ApiResult<Session> {
    let session = state
        .store
        .update_session(&id, &patch)?
        .ok_or_else(|| ApiError::session_not_found(&id))?;
    state.record_action("update-session");
    Ok(Json(session))
}

/// Handle DELETE /sessions/:id - Idempotent delete
pub async fn delete_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<ApiResponse> {
    if state.store.delete_session(&id) {
        state.record_action("delete-session");
        Json(ApiResponse::ok(format!("Session {} deleted", id), None))
    } else {
        Json(ApiResponse::unchanged(format!("Session {} does not exist", id)))
    }
}

/// Handle POST /sessions/:id/select - Make a session active
pub async fn select_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse> {
    state.store.select_session(&id)?;
    state.record_action("select-session");
    info!("Session {} selected via API", id);
    Ok(Json(ApiResponse::ok(
        format!("Session {} is now active", id),
        state.store.session(&id),
    )))
}

/// Handle GET /sessions/:id/display - Frame for a display pinned to one session
pub async fn session_display_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> (StatusCode, Json<DisplayFrame>) {
    match state.store.session(&id) {
        Some(session) => (
            StatusCode::OK,
            Json(DisplayFrame::for_session(Some(&session))),
        ),
        None => (StatusCode::NOT_FOUND, Json(DisplayFrame::NoSession)),
    }
}

// ── Active session ───────────────────────────────────────────────────

/// Handle GET /active - The active session
pub async fn active_session_handler(State(state): State<Arc<AppState>>) -> ApiResult<Session> {
    state
        .store
        .active_session()
        .map(Json)
        .ok_or_else(ApiError::no_active_session)
}

/// Only a mutation that found an active session counts as the last action
fn active_result(updated: Option<Session>) -> ApiResult<Session> {
    updated.map(Json).ok_or_else(ApiError::no_active_session)
}

/// Handle PATCH /active/timer
pub async fn update_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<TimerPatch>,
) -> ApiResult<Session> {
    let session = active_result(state.store.update_timer(patch)?)?;
    state.record_action("update-timer");
    Ok(session)
}

/// Handle PATCH /active/display
pub async fn update_display_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<DisplayPatch>,
) -> ApiResult<Session> {
    let session = active_result(state.store.update_display(patch)?)?;
    state.record_action("update-display");
    Ok(session)
}

/// Handle PATCH /active/messages
pub async fn update_messages_handler(
    State(state): State<Arc<AppState>>,
    Json(patch): Json<MessagesPatch>,
) -> ApiResult<Session> {
    let session = active_result(state.store.update_messages(patch)?)?;
    state.record_action("update-messages");
    Ok(session)
}

/// Handle POST /active/timer/start
pub async fn start_timer_handler(State(state): State<Arc<AppState>>) -> ApiResult<Session> {
    let session = active_result(state.store.start_timer())?;
    state.record_action("start");
    Ok(session)
}

/// Handle POST /active/timer/pause
pub async fn pause_timer_handler(State(state): State<Arc<AppState>>) -> ApiResult<Session> {
    let session = active_result(state.store.pause_timer())?;
    state.record_action("pause");
    Ok(session)
}

/// Handle POST /active/timer/reset
pub async fn reset_timer_handler(State(state): State<Arc<AppState>>) -> ApiResult<Session> {
    let session = active_result(state.store.reset_timer())?;
    state.record_action("reset");
    Ok(session)
}

/// Handle POST /active/timer/duration - Set a new countdown length
pub async fn set_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DurationRequest>,
) -> ApiResult<Session> {
    let session = active_result(state.store.set_duration(request.minutes)?)?;
    state.record_action("set-duration");
    Ok(session)
}

// ── Stage display ────────────────────────────────────────────────────

/// Handle GET /display - Frame of the active session, polled by the renderer
pub async fn display_handler(State(state): State<Arc<AppState>>) -> Json<DisplayFrame> {
    Json(DisplayFrame::for_session(state.store.active_session().as_ref()))
}
