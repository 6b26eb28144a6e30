//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/sessions", get(list_sessions_handler).post(create_session_handler))
        .route(
            "/sessions/:id",
            patch(update_session_handler).delete(delete_session_handler),
        )
        .route("/sessions/:id/select", post(select_session_handler))
        .route("/sessions/:id/display", get(session_display_handler))
        .route("/active", get(active_session_handler))
        .route("/active/timer", patch(update_timer_handler))
        .route("/active/timer/start", post(start_timer_handler))
        .route("/active/timer/pause", post(pause_timer_handler))
        .route("/active/timer/reset", post(reset_timer_handler))
        .route("/active/timer/duration", post(set_duration_handler))
        .route("/active/display", patch(update_display_handler))
        .route("/active/messages", patch(update_messages_handler))
        .route("/display", get(display_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
