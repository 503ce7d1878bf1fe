//! SipHash-1-3 hash function.

use crate::hash::traits::{HashError, KeyHasher};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 with fixed zero keys, so positions are stable across processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipHasher;

impl KeyHasher for SipHasher {
    fn hash(&self, key: &[u8]) -> Result<u64, HashError> {
        let mut hasher = SipHasher13::new();
        hasher.write(key);
        Ok(hasher.finish())
    }

    fn name(&self) -> &'static str {
        "sip13"
    }
}
