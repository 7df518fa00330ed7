//! HTTP response bodies
//!
//! Field names and shapes are part of the public interface; existing clients
//! parse them directly.

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the status route
pub const NEXT_REFRESH_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const STREAM_NOT_FOUND: &str = "Stream not found";
pub const INVALID_STREAM_URL: &str = "Invalid stream URL";

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub mappings: usize,
    pub next_refresh: String,
}

impl StatusResponse {
    pub fn new(mappings: usize, next_refresh: DateTime<Utc>) -> Self {
        Self {
            mappings,
            next_refresh: format_next_refresh(next_refresh),
        }
    }
}

/// Render a timestamp in server local time
pub fn format_next_refresh(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format(NEXT_REFRESH_FORMAT)
        .to_string()
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mappings: usize,
    pub last_refresh: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub next_refresh: DateTime<Utc>,
    pub version: String,
}

/// `{"error": "..."}` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new<S: Into<String>>(error: S) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Error payload paired with the status it should be sent with
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn stream_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            body: ErrorResponse::new(STREAM_NOT_FOUND),
        }
    }

    pub fn invalid_stream_url() -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            body: ErrorResponse::new(INVALID_STREAM_URL),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
