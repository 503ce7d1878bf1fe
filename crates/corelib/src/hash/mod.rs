//! Pluggable hash functions for ring placement.
//!
//! A hasher turns lookup keys and virtual-node labels into positions on the
//! 64-bit ring. The ring treats it as a black box that may fail.

pub mod fnv;
pub mod sip;
pub mod traits;
pub mod xxh3;

pub use fnv::Fnv1aHasher;
pub use sip::SipHasher;
pub use traits::{FnHasher, HashError, KeyHasher};
pub use xxh3::Xxh3Hasher;
