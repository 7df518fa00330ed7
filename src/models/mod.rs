use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::channel_hash;

/// A single proxied channel as held by the mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelEntry {
    /// Routing key, always `channel_hash(channel_name)`
    pub hash: String,
    /// Upstream media URL the proxy route redirects to
    pub stream_url: String,
    pub channel_name: String,
    /// Original `#EXTINF` line, re-emitted verbatim
    pub raw_metadata: String,
}

impl ChannelEntry {
    pub fn new(channel_name: String, stream_url: String, raw_metadata: String) -> Self {
        Self {
            hash: channel_hash(&channel_name),
            stream_url,
            channel_name,
            raw_metadata,
        }
    }
}

/// Refresh bookkeeping exposed to the health route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshStatus {
    /// Hours between cycles
    pub interval_hours: u64,
    pub next_run_at: DateTime<Utc>,
    pub last_success_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    /// Entry count installed by the last successful cycle
    pub last_entry_count: Option<usize>,
}
