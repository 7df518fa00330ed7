use tracing::debug;

use crate::models::ChannelEntry;

pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// URL clients use to reach a channel through this service
pub fn proxy_stream_url(hostport: &str, hash: &str) -> String {
    format!("http://{}/proxy/{}", hostport, hash)
}

/// Render entries as an M3U document
///
/// Each entry contributes its original metadata line unchanged, followed by
/// its proxy URL. Every line, the header included, ends with `\n`.
pub fn render_playlist<'a, I>(entries: I, hostport: &str) -> String
where
    I: IntoIterator<Item = &'a ChannelEntry>,
{
    let mut m3u = String::from(PLAYLIST_HEADER);
    m3u.push('\n');

    let mut count = 0usize;
    for entry in entries {
        m3u.push_str(&format!("{}\n", entry.raw_metadata));
        m3u.push_str(&format!("{}\n", proxy_stream_url(hostport, &entry.hash)));
        count += 1;
    }

    debug!("Generated proxified M3U with {} channels", count);
    m3u
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::channel_hash;

    fn entry(name: &str, metadata: &str) -> ChannelEntry {
        ChannelEntry::new(
            name.to_string(),
            format!("http://upstream/{}.m3u8", name),
            metadata.to_string(),
        )
    }

    #[test]
    fn test_empty_playlist_is_header_only() {
        let entries: Vec<ChannelEntry> = Vec::new();
        assert_eq!(render_playlist(&entries, "localhost:8000"), "#EXTM3U\n");
    }

    #[test]
    fn test_render_rewrites_stream_urls() {
        let entries = vec![
            entry("a", r#"#EXTINF:-1 tvg-name="a" tvg-logo="http://logos/a.png",A"#),
            entry("b", r#"#EXTINF:-1 tvg-name="b",B"#),
        ];

        let rendered = render_playlist(&entries, "media.lan:9000");
        let expected = format!(
            "#EXTM3U\n{}\nhttp://media.lan:9000/proxy/{}\n{}\nhttp://media.lan:9000/proxy/{}\n",
            r#"#EXTINF:-1 tvg-name="a" tvg-logo="http://logos/a.png",A"#,
            channel_hash("a"),
            r#"#EXTINF:-1 tvg-name="b",B"#,
            channel_hash("b"),
        );
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_upstream_urls_never_leak() {
        let entries = vec![entry("secret", r#"#EXTINF:-1 tvg-name="secret",Secret"#)];
        let rendered = render_playlist(&entries, "localhost:8000");
        assert!(!rendered.contains("http://upstream/"));
    }
}
