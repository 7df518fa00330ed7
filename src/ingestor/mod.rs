use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::errors::SourceResult;
use crate::models::ChannelEntry;
use crate::store::MappingStore;

pub mod fetcher;
pub mod m3u_parser;
pub mod scheduler;

pub use fetcher::PlaylistFetcher;
pub use m3u_parser::{parse_playlist, ParsedChannel};
pub use scheduler::SchedulerService;

/// Anything that can hand over raw playlist text
#[async_trait]
pub trait PlaylistSource: Send + Sync {
    async fn fetch_playlist(&self) -> SourceResult<String>;

    /// Human readable origin, used in logs
    fn describe(&self) -> &str;
}

/// Runs one fetch, parse and replace pass against the mapping store
#[derive(Clone)]
pub struct IngestorService {
    source: Arc<dyn PlaylistSource>,
    store: MappingStore,
}

impl IngestorService {
    pub fn new(source: Arc<dyn PlaylistSource>, store: MappingStore) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &MappingStore {
        &self.store
    }

    /// Refresh the mapping table from the source
    ///
    /// On error the installed table is left as it was. Returns the number of
    /// entries in the newly installed table.
    pub async fn refresh_mappings(&self) -> SourceResult<usize> {
        info!("Updating M3U mappings from {}", self.source.describe());

        let content = self.source.fetch_playlist().await?;
        let entries = parse_playlist(&content).into_iter().map(|channel| {
            ChannelEntry::new(channel.channel_name, channel.stream_url, channel.metadata)
        });

        Ok(self.store.replace(entries).await)
    }
}
