//! Centralized error handling for the playlist proxy
//!
//! # Error Categories
//!
//! - **Source Errors**: fetching the upstream playlist (network, timeout, HTTP status)
//! - **Configuration Errors**: invalid or unloadable settings
//! - **Internal Errors**: everything else that should never reach a client
//!
//! Records the parser cannot use are not errors; they are dropped.
//!
//! # Usage
//!
//! ```rust
//! use m3u_hash_proxy::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::configuration("M3U_UPDATEHOURS must be at least 1"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Source Results
pub type SourceResult<T> = Result<T, SourceError>;
