use axum::{
    extract::{Path, State},
    http::HeaderValue,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{error, info, warn};

use crate::web::{responses::ApiError, AppState};

/// `GET /proxy/:hash`: redirect to the upstream stream URL
///
/// Unknown hashes get a 404 with `{"error": "Stream not found"}`.
pub async fn proxy_stream(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let Some(entry) = state.store.lookup(&hash).await else {
        warn!("Stream not found for hash: {}", hash);
        return ApiError::stream_not_found().into_response();
    };

    // Playlist URLs are not validated at parse time
    if HeaderValue::from_str(&entry.stream_url).is_err() {
        error!(
            "Stream URL for channel '{}' ({}) cannot be used as a redirect target: {:?}",
            entry.channel_name, hash, entry.stream_url
        );
        return ApiError::invalid_stream_url().into_response();
    }

    info!(
        "Redirecting stream request for channel '{}' ({}) to {}",
        entry.channel_name, hash, entry.stream_url
    );
    Redirect::temporary(&entry.stream_url).into_response()
}
