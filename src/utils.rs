//! Utility functions for the playlist proxy
//!
//! - `utils::hash` derives the short routing key used in proxy URLs

pub mod hash;

pub use hash::channel_hash;
