use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info};

use super::PlaylistSource;
use crate::errors::{SourceError, SourceResult};

/// Downloads the upstream playlist over HTTP
///
/// No retries: a failure is handed straight back to the refresh cycle.
#[derive(Clone)]
pub struct PlaylistFetcher {
    client: Client,
    url: String,
}

impl PlaylistFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("m3u-hash-proxy/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Perform one GET against `url` and return the body as text
    pub async fn fetch(&self, url: &str) -> SourceResult<String> {
        info!("Downloading M3U from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Failed to connect to M3U source {}: {}", url, e);
            SourceError::from_reqwest(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("M3U source {} answered with status {}", url, status);
            return Err(SourceError::http(status.as_u16(), url));
        }

        let content = response
            .text()
            .await
            .map_err(|e| SourceError::from_reqwest(url, e))?;

        info!("Download completed for {}: {} bytes", url, content.len());
        Ok(content)
    }
}

#[async_trait]
impl PlaylistSource for PlaylistFetcher {
    async fn fetch_playlist(&self) -> SourceResult<String> {
        self.fetch(&self.url).await
    }

    fn describe(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use std::net::SocketAddr;

    async fn spawn_upstream(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let app = Router::new().route(
            "/list.m3u",
            get(|| async { "#EXTM3U\n#EXTINF:-1 tvg-name=\"A\",A\nhttp://upstream/a\n" }),
        );
        let addr = spawn_upstream(app).await;

        let url = format!("http://{}/list.m3u", addr);
        let fetcher = PlaylistFetcher::new(url.clone(), Duration::from_secs(5));
        let body = fetcher.fetch_playlist().await.unwrap();
        assert!(body.starts_with("#EXTM3U"));
        assert_eq!(fetcher.describe(), url);
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let app = Router::new().route(
            "/list.m3u",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let addr = spawn_upstream(app).await;

        let fetcher = PlaylistFetcher::new(
            format!("http://{}/list.m3u", addr),
            Duration::from_secs(5),
        );
        let err = fetcher.fetch_playlist().await.unwrap_err();
        assert!(matches!(err, SourceError::Http { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let app = Router::new().route(
            "/slow.m3u",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "#EXTM3U\n"
            }),
        );
        let addr = spawn_upstream(app).await;

        let fetcher = PlaylistFetcher::new(
            format!("http://{}/slow.m3u", addr),
            Duration::from_millis(100),
        );
        let err = fetcher.fetch_playlist().await.unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind then drop to obtain a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher =
            PlaylistFetcher::new(format!("http://{}/list.m3u", addr), Duration::from_secs(2));
        let err = fetcher.fetch_playlist().await.unwrap_err();
        assert!(matches!(err, SourceError::Network { .. }));
    }
}
