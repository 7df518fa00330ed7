//! Content-addressed channel identifiers

use sha2::{Digest, Sha256};

/// Number of hex characters kept from the digest
pub const HASH_LENGTH: usize = 16;

/// Derive the routing key for a channel name
///
/// SHA-256 over the UTF-8 bytes of `name`, rendered as lowercase hex and
/// truncated to [`HASH_LENGTH`] characters.
pub fn channel_hash(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    let digest = hasher.finalize();

    let mut hash = format!("{digest:x}");
    hash.truncate(HASH_LENGTH);
    hash
}
