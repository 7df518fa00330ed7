//! Liveness and refresh health reporting

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::web::{responses::HealthResponse, AppState};

/// `GET /health`
///
/// Reports `degraded` while the most recent refresh cycle has failed; the
/// previous table is still being served in that state.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let refresh = state.schedule.status().await;
    let mappings = state.store.len().await;

    let status = if refresh.last_error.is_some() {
        "degraded"
    } else {
        "healthy"
    };

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            mappings,
            last_refresh: refresh.last_success_at,
            last_error: refresh.last_error,
            next_refresh: refresh.next_run_at,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}
