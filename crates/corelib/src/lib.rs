//! Consistent hashing with bounded loads.
//!
//! This crate assigns lookup keys to a dynamic set of hosts such that:
//! - assignments stay stable as hosts join and leave (consistent hashing)
//! - no host's load exceeds `load_factor` times the cluster average
//!   (bounded loads, when using [`Ring::get_least`])
//!
//! Modules:
//! - Pluggable hash functions
//! - Virtual node placement
//! - Ring topology and search
//! - Load ledger
//!
//! # Example
//!
//! ```rust
//! use corelib::RingBuilder;
//!
//! let ring = RingBuilder::new()
//!     .with_replication_factor(50)
//!     .add_hosts(["host1", "host2", "host3"])
//!     .build()
//!     .unwrap();
//!
//! let host = ring.get_least("user:1234").unwrap();
//! ring.increase_load(&host).unwrap();
//! assert_eq!(ring.total_load(), 1);
//! ```

pub mod config;
pub mod error;
pub mod hash;
pub mod ledger;
pub mod ring;
pub mod topology;
pub mod vnode;

pub use config::Config;
pub use error::{Error, Result};
pub use hash::{HashError, KeyHasher};
pub use ledger::LoadLedger;
pub use ring::{Ring, RingBuilder};
pub use topology::Topology;
pub use vnode::VirtualNode;
