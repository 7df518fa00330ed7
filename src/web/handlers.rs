//! HTTP request handlers, one module per route family

pub mod health;
pub mod index;
pub mod playlist;
pub mod proxies;
