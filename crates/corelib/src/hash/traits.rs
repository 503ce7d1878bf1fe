//! Core hash function trait definitions.

use std::fmt;

/// Errors a hash function can report for a given input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    /// The hasher refused the input bytes.
    #[error("hasher rejected input: {0}")]
    Rejected(String),
    /// The hasher failed for a reason unrelated to the input.
    #[error("hasher failure: {0}")]
    Failed(String),
}

/// A hash function places keys and virtual nodes on the 64-bit ring.
///
/// Hashers are stateless and shared between threads, so lookups can hash
/// concurrently without synchronization.
pub trait KeyHasher: Send + Sync + 'static {
    /// Maps `key` to a ring position.
    ///
    /// # Arguments
    ///
    /// * `key` - The raw bytes of a lookup key or virtual-node label
    ///
    /// # Returns
    ///
    /// The 64-bit position, or the reason the input could not be hashed
    fn hash(&self, key: &[u8]) -> Result<u64, HashError>;

    /// Returns the name of this hash function.
    fn name(&self) -> &'static str;
}

/// Adapts any closure into a [`KeyHasher`].
///
/// Useful for custom hash functions and for deterministic stubs in tests.
///
/// # Example
///
/// ```rust
/// use corelib::hash::{FnHasher, KeyHasher};
///
/// let hasher = FnHasher::new(|key: &[u8]| Ok(key.len() as u64));
/// assert_eq!(hasher.hash(b"abc").unwrap(), 3);
/// ```
#[derive(Clone)]
pub struct FnHasher<F> {
    func: F,
}

impl<F> FnHasher<F>
where
    F: Fn(&[u8]) -> Result<u64, HashError> + Send + Sync + 'static,
{
    /// Wraps `func` as a hasher.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> KeyHasher for FnHasher<F>
where
    F: Fn(&[u8]) -> Result<u64, HashError> + Send + Sync + 'static,
{
    fn hash(&self, key: &[u8]) -> Result<u64, HashError> {
        (self.func)(key)
    }

    fn name(&self) -> &'static str {
        "FnHasher"
    }
}

impl<F> fmt::Debug for FnHasher<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHasher").finish_non_exhaustive()
    }
}
