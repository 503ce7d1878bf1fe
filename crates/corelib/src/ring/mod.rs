//! Consistent hash ring implementation.
//!
//! The ring manages virtual-node positions and load counters and answers
//! "which host should handle this key right now".

pub mod builder;
pub mod position;
#[allow(clippy::module_inception)]
pub mod ring;

pub use builder::RingBuilder;
pub use ring::Ring;
