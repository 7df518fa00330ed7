use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

pub const EXTINF_MARKER: &str = "#EXTINF";

/// One usable record extracted from a playlist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChannel {
    pub channel_name: String,
    pub stream_url: String,
    /// The `#EXTINF` line exactly as it appeared in the source
    pub metadata: String,
}

fn tvg_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"tvg-name="([^"]+)""#).expect("valid tvg-name pattern"))
}

/// Extract the `tvg-name` attribute from an `#EXTINF` line
pub fn extract_tvg_name(metadata: &str) -> Option<&str> {
    tvg_name_pattern()
        .captures(metadata)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Parse playlist text into channel records
///
/// Each `#EXTINF` line consumes the line after it as its stream URL, whatever
/// that line contains. Records without a `tvg-name` or without a non-empty
/// URL line are dropped. Output follows source order.
pub fn parse_playlist(content: &str) -> Vec<ParsedChannel> {
    let mut channels = Vec::new();
    let mut dropped = 0usize;
    let mut lines = content.lines();

    while let Some(line) = lines.next() {
        if !line.starts_with(EXTINF_MARKER) {
            continue;
        }

        let stream_url = lines.next().unwrap_or("").trim();

        match extract_tvg_name(line) {
            Some(name) if !stream_url.is_empty() => {
                channels.push(ParsedChannel {
                    channel_name: name.to_string(),
                    stream_url: stream_url.to_string(),
                    metadata: line.to_string(),
                });
            }
            Some(name) => {
                debug!("Dropping '{}': no stream URL follows its metadata line", name);
                dropped += 1;
            }
            None => {
                debug!("Dropping record without tvg-name: {}", line);
                dropped += 1;
            }
        }
    }

    info!(
        "Parsed {} channels from playlist ({} records dropped)",
        channels.len(),
        dropped
    );

    channels
}
