//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::StoreError, state::Session};

/// Response envelope for operator actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, session: Option<Session>) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// The action changed something
    pub fn ok(message: String, session: Option<Session>) -> Self {
        Self::new("ok", message, session)
    }

    /// The action was accepted but there was nothing to change
    pub fn unchanged(message: String) -> Self {
        Self::new("unchanged", message, None)
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self::new("error", message, None)
    }
}

/// Error returned from handlers, rendered as an `ApiResponse` envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn no_active_session() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: "No active session".to_string(),
        }
    }

    pub fn session_not_found(id: &str) -> Self {
        StoreError::NotFound(id.to_string()).into()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let status = match err {
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::error(self.message))).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    pub minutes: i64,
}

/// Status response with store and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session_count: usize,
    pub active_session_id: Option<String>,
    pub timer_running: bool,
    pub timer_remaining_seconds: Option<u64>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
