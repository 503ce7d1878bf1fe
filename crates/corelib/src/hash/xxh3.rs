//! XXH3 hash function (default).

use crate::hash::traits::{HashError, KeyHasher};
use xxhash_rust::xxh3::xxh3_64;

/// 64-bit XXH3 hasher. Fast, well distributed, and the ring's default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hasher;

impl KeyHasher for Xxh3Hasher {
    fn hash(&self, key: &[u8]) -> Result<u64, HashError> {
        Ok(xxh3_64(key))
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
