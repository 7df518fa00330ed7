use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use tracing::info;

use crate::proxy::render_playlist;
use crate::web::AppState;

pub const PLAYLIST_CONTENT_TYPE: &str = "application/x-mpegURL";
pub const PLAYLIST_DISPOSITION: &str = "attachment; filename=playlist.m3u";

/// `GET /playlist.m3u`: the installed table rendered with proxy URLs
pub async fn serve_playlist(State(state): State<AppState>) -> impl IntoResponse {
    info!("Generating proxified M3U");
    let table = state.store.snapshot().await;
    let body = render_playlist(table.iter(), &state.config.hostport);

    (
        [
            (header::CONTENT_TYPE, PLAYLIST_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, PLAYLIST_DISPOSITION),
        ],
        body,
    )
}
