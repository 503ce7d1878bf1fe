//! 64-bit FNV-1a hash function.

use crate::hash::traits::{HashError, KeyHasher};

const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
///
/// Weaker mixing than XXH3 (close labels like `host1`/`host2` land near each
/// other), but cheap and widely used by bounded-load balancers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1aHasher;

impl KeyHasher for Fnv1aHasher {
    fn hash(&self, key: &[u8]) -> Result<u64, HashError> {
        Ok(key.iter().fold(OFFSET_BASIS, |h, &b| {
            (h ^ u64::from(b)).wrapping_mul(PRIME)
        }))
    }

    fn name(&self) -> &'static str {
        "fnv1a"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_reference_vectors() {
        let hasher = Fnv1aHasher;
        assert_eq!(hasher.hash(b"").unwrap(), 0xcbf2_9ce4_8422_2325);
        assert_eq!(hasher.hash(b"a").unwrap(), 0xaf63_dc4c_8601_ec8c);
        assert_eq!(hasher.hash(b"foobar").unwrap(), 0x8594_4171_f739_67e8);
    }
}
