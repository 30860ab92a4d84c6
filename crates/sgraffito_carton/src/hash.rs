//! Fast hashing utilities using xxHash3.
//!
//! Used for cache keys: the token-stream cache and the dispatch session
//! cache both key on document text plus an options fingerprint.

use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

/// Compute a 64-bit hash of the given string using xxHash3.
#[inline]
pub fn hash_str(data: &str) -> u64 {
    xxh3_64(data.as_bytes())
}

/// Fold another string into an existing hash.
///
/// Order matters: `combine_hash(combine_hash(0, a), b)` differs from the
/// reverse, which is what option lists need.
#[inline]
pub fn combine_hash(seed: u64, data: &str) -> u64 {
    xxh3_64_with_seed(data.as_bytes(), seed)
}

/// Convert a hash to a hex string (16 characters).
#[inline]
pub fn hash_to_hex(hash: u64) -> String {
    format!("{:016x}", hash)
}
