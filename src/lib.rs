//! Hash-addressed M3U proxy
//!
//! Fetches an upstream M3U playlist on a timer, keys every channel by a short
//! digest of its `tvg-name`, and serves a rewritten playlist whose stream
//! lines point back at `/proxy/<hash>` on this service. Proxy requests are
//! answered with a redirect to the real stream URL.

pub mod config;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod proxy;
pub mod store;
pub mod utils;
pub mod web;
