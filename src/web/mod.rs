//! Web layer module
//!
//! Thin axum handlers over the mapping store and refresh schedule. Handlers
//! only read; the refresh task is the sole writer.
//!
//! # Routes
//!
//! - `GET /` mapping count and next refresh time
//! - `GET /playlist.m3u` the rewritten playlist
//! - `GET /proxy/:hash` redirect to the upstream stream
//! - `GET /health` refresh health

use axum::{routing::get, Router};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    config::Config,
    errors::AppResult,
    ingestor::scheduler::{ScheduleHandle, ShutdownReceiver},
    store::MappingStore,
};

pub mod handlers;
pub mod responses;

pub use responses::{ErrorResponse, HealthResponse, StatusResponse};

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: Config, store: MappingStore, schedule: ScheduleHandle) -> AppResult<Self> {
        let addr = config.listen_addr()?;
        let app = create_router(AppState {
            config,
            store,
            schedule,
        });

        Ok(Self { app, addr })
    }

    /// Serve until a shutdown signal arrives
    pub async fn serve(self, mut shutdown_rx: ShutdownReceiver) -> AppResult<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("Web server shutting down");
            })
            .await?;
        Ok(())
    }

    /// Get the host address
    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    /// Get the port number
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Create the router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index::status))
        .route("/playlist.m3u", get(handlers::playlist::serve_playlist))
        .route("/proxy/:hash", get(handlers::proxies::proxy_stream))
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: MappingStore,
    pub schedule: ScheduleHandle,
}
