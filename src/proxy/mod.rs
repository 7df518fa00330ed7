//! Proxy playlist generation
//!
//! Turns the installed mapping table back into an M3U document whose stream
//! lines point at this service instead of the upstream media servers.

pub mod generator;

pub use generator::{proxy_stream_url, render_playlist, PLAYLIST_HEADER};
