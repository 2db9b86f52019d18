//! SHA-256 checksums for log records
//!
//! The checksum covers the exact bytes of `timestamp|event_type|payload`
//! and is stored as a lowercase hex digest in the fourth field of the line.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub const CHECKSUM_LEN: usize = 64;

/// Computes the hex SHA-256 digest of `data`.
///
/// Deterministic: the same input always produces the same digest.
pub fn compute_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Verifies that `data` hashes to `expected`.
pub fn verify_checksum(data: &[u8], expected: &str) -> bool {
    compute_checksum(data) == expected
}
