//! Hash-indexed channel table shared between the refresh task and HTTP handlers
//!
//! The table itself is immutable once built. [`MappingStore`] holds the
//! currently installed table behind an `Arc`; a refresh builds a complete
//! replacement off to the side and swaps the pointer. Readers clone the `Arc`
//! and drop the lock immediately, so every lookup or snapshot sees exactly one
//! table version and never waits on a playlist download.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::ChannelEntry;

/// One immutable generation of the mapping
#[derive(Debug, Default)]
pub struct MappingTable {
    entries: HashMap<String, ChannelEntry>,
    /// Hashes in order of first appearance
    order: Vec<String>,
}

impl MappingTable {
    /// Build a table, last write wins on duplicate hash
    ///
    /// An overwritten entry keeps the position of its first occurrence.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ChannelEntry>,
    {
        let mut table = Self::default();
        for entry in entries {
            if let Some(previous) = table.entries.get(&entry.hash) {
                debug!(
                    "Channel '{}' ({}) overwrites earlier mapping to {}",
                    entry.channel_name, entry.hash, previous.stream_url
                );
            } else {
                table.order.push(entry.hash.clone());
            }
            debug!("Added mapping: {} -> {}", entry.channel_name, entry.hash);
            table.entries.insert(entry.hash.clone(), entry);
        }
        table
    }

    pub fn get(&self, hash: &str) -> Option<&ChannelEntry> {
        self.entries.get(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in snapshot order
    pub fn iter(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.order.iter().filter_map(|hash| self.entries.get(hash))
    }
}

/// Process-wide holder of the current [`MappingTable`]
///
/// Cloning is cheap and every clone refers to the same installed table.
#[derive(Clone, Default)]
pub struct MappingStore {
    current: Arc<RwLock<Arc<MappingTable>>>,
}

impl MappingStore {
    /// Create a store holding an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new table from `entries` and install it in place of the current one
    ///
    /// Returns the number of entries in the installed table.
    pub async fn replace<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = ChannelEntry>,
    {
        let table = Arc::new(MappingTable::from_entries(entries));
        let count = table.len();

        {
            let mut current = self.current.write().await;
            *current = table;
        }

        info!("{} mappings updated successfully", count);
        count
    }

    /// Point lookup against the installed table
    pub async fn lookup(&self, hash: &str) -> Option<ChannelEntry> {
        self.snapshot().await.get(hash).cloned()
    }

    /// The installed table, pinned for as long as the caller holds it
    pub async fn snapshot(&self) -> Arc<MappingTable> {
        let current = self.current.read().await;
        (*current).clone()
    }

    pub async fn len(&self) -> usize {
        self.snapshot().await.len()
    }
}
