//! SHA-256 content checksums for drift detection.
//!
//! A migration unit's checksum is computed over its raw source text, byte
//! for byte. Any edit to an already-applied file, including whitespace,
//! changes the checksum and is reported as drift.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 checksum of a unit's source text.
pub fn checksum_hex(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Abbreviate a hex checksum for display (first 8 characters).
///
/// Checksums shorter than 8 characters are returned unchanged.
pub fn short_checksum(checksum: &str) -> &str {
    checksum.get(..8).unwrap_or(checksum)
}
