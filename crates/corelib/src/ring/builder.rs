//! Builder for [`Ring`].

use crate::config::Config;
use crate::error::Result;
use crate::hash::KeyHasher;
use crate::ring::Ring;

/// Builds a [`Ring`] with its parameters and an initial host set.
///
/// # Example
///
/// ```rust
/// use corelib::RingBuilder;
/// use corelib::hash::Fnv1aHasher;
///
/// let ring = RingBuilder::new()
///     .with_replication_factor(100)
///     .with_load_factor(1.5)
///     .with_hasher(Fnv1aHasher)
///     .add_host("cache-a")
///     .add_host("cache-b")
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.vnode_count(), 200);
/// ```
#[derive(Debug, Default)]
pub struct RingBuilder {
    config: Config,
    hosts: Vec<String>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing config.
    pub fn from_config(config: Config) -> Self {
        Self {
            config,
            hosts: Vec::new(),
        }
    }

    /// Set the number of virtual nodes per host.
    pub fn with_replication_factor(mut self, replication_factor: usize) -> Self {
        self.config.replication_factor = replication_factor;
        self
    }

    /// Set the load factor (alpha).
    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.config.load_factor = load_factor;
        self
    }

    /// Set the hash function.
    pub fn with_hasher(mut self, hasher: impl KeyHasher) -> Self {
        self.config = self.config.with_hasher(hasher);
        self
    }

    /// Add a host to the initial host set.
    pub fn add_host(mut self, host: impl Into<String>) -> Self {
        self.hosts.push(host.into());
        self
    }

    /// Add several hosts to the initial host set.
    pub fn add_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts.extend(hosts.into_iter().map(Into::into));
        self
    }

    /// Build the ring and add the initial hosts in order.
    ///
    /// # Errors
    ///
    /// Fails on an unusable config or if a host cannot be hashed onto the ring.
    pub fn build(self) -> Result<Ring> {
        let ring = Ring::new(self.config)?;
        for host in &self.hosts {
            ring.add(host)?;
        }
        Ok(ring)
    }
}
