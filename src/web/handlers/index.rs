use axum::{extract::State, response::IntoResponse, Json};

use crate::web::{responses::StatusResponse, AppState};

/// `GET /`: mapping count and next scheduled refresh
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    let mappings = state.store.len().await;
    let next_refresh = state.schedule.next_run().await;

    Json(StatusResponse::new(mappings, next_refresh))
}
