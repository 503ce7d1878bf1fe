//! Consistent hash ring with bounded loads.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::ledger::LoadLedger;
use crate::ring::position;
use crate::topology::Topology;
use crate::vnode::VirtualNode;

/// Thread-safe consistent hash ring with bounded loads.
///
/// State is split into two independently locked objects:
///
/// - the **topology** (sorted virtual nodes + host list), written by
///   [`add`](Self::add) / [`remove`](Self::remove) and read by lookups
/// - the **load ledger** (per-host load + total), written by the load
///   operations
///
/// Locks are always taken topology first, then ledger. Add and remove update
/// the ledger while still holding the topology write lock, so a lookup holding
/// the topology read lock sees exactly the same host set in both.
///
/// # Example
///
/// ```rust
/// use corelib::{Config, Ring};
///
/// let ring = Ring::new(Config::new(3, 1.25)).unwrap();
/// ring.add("A").unwrap();
/// ring.add("B").unwrap();
///
/// let host = ring.get_least("request-42").unwrap();
/// ring.increase_load(&host).unwrap();
/// // ... forward the request, then:
/// ring.decrease_load(&host).unwrap();
/// ```
#[derive(Debug)]
pub struct Ring {
    config: Config,
    topology: RwLock<Topology>,
    ledger: RwLock<LoadLedger>,
}

impl Ring {
    /// Creates an empty ring.
    ///
    /// Out-of-range parameters are defaulted (see [`Config::resolve`]).
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the load factor is not a finite number.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            config: config.resolve()?,
            topology: RwLock::new(Topology::new()),
            ledger: RwLock::new(LoadLedger::new()),
        })
    }

    /// Creates an empty ring with R = 10, alpha = 1.25 and XXH3.
    pub fn with_defaults() -> Self {
        Self {
            config: Config::default(),
            topology: RwLock::new(Topology::new()),
            ledger: RwLock::new(LoadLedger::new()),
        }
    }

    // ------------------------------------------------------------------
    // Topology
    // ------------------------------------------------------------------

    /// Adds a host with `R` virtual nodes and load 0.
    ///
    /// Adding a host that is already present succeeds and changes nothing.
    ///
    /// # Errors
    ///
    /// [`Error::Hashing`] if a virtual-node label cannot be hashed; the ring
    /// is left unchanged.
    pub fn add(&self, host: &str) -> Result<()> {
        let mut topology = self.topology.write();
        let hasher = self.config.hasher.as_ref();
        let Some(owner) = topology.add(host, hasher, self.config.replication_factor)? else {
            return Ok(());
        };
        self.ledger.write().insert(owner);
        debug!(
            host,
            vnodes = self.config.replication_factor,
            hosts = topology.host_count(),
            "added host to ring"
        );
        Ok(())
    }

    /// Removes a host, its virtual nodes, and its load.
    ///
    /// # Errors
    ///
    /// [`Error::HostNotFound`] if the host is not in the ring.
    pub fn remove(&self, host: &str) -> Result<()> {
        let mut topology = self.topology.write();
        if !topology.remove(host) {
            return Err(Error::host_not_found(host));
        }
        let load = self.ledger.write().remove(host).unwrap_or(0);
        debug!(host, load, hosts = topology.host_count(), "removed host from ring");
        Ok(())
    }

    /// Snapshot of the host names, in the order they were added.
    pub fn hosts(&self) -> Vec<String> {
        self.topology
            .read()
            .hosts()
            .iter()
            .map(|host| host.to_string())
            .collect()
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    /// Returns the host owning the first virtual node clockwise from
    /// `hash(key)`, ignoring load.
    ///
    /// # Errors
    ///
    /// [`Error::NoHostAvailable`] if the ring is empty, [`Error::Hashing`] if
    /// the key cannot be hashed.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<String> {
        let topology = self.topology.read();
        if topology.is_empty() {
            return Err(Error::NoHostAvailable);
        }
        let hash = self.hash(key)?;
        topology
            .owner_of(hash)
            .map(|owner| owner.to_string())
            .ok_or(Error::NoHostAvailable)
    }

    /// Returns the least-loaded host whose load is below [`max_load`],
    /// walking clockwise from `hash(key)`.
    ///
    /// Ties go to the host reached first on the walk. If no host is below the
    /// bound, the host [`get`] would return is used instead.
    ///
    /// Loads are read under the ledger lock but may change right after, so the
    /// bound is advisory under concurrent load updates.
    ///
    /// [`max_load`]: Self::max_load
    /// [`get`]: Self::get
    ///
    /// # Errors
    ///
    /// [`Error::NoHostAvailable`] if the ring is empty, [`Error::Hashing`] if
    /// the key cannot be hashed.
    pub fn get_least(&self, key: impl AsRef<[u8]>) -> Result<String> {
        let topology = self.topology.read();
        if topology.is_empty() {
            return Err(Error::NoHostAvailable);
        }
        let hash = self.hash(key)?;

        let ledger = self.ledger.read();
        let max_load = ledger.max_load(topology.host_count(), self.config.load_factor);
        let chosen = position::least_loaded(topology.walk_from(hash), max_load, |host| {
            ledger.load(host)
        });

        match chosen {
            Some(host) => Ok(host.to_owned()),
            None => {
                trace!(max_load, "no host under the load bound, using ring successor");
                topology
                    .owner_of(hash)
                    .map(|owner| owner.to_string())
                    .ok_or(Error::NoHostAvailable)
            }
        }
    }

    /// Hashes `key` with the configured hash function.
    pub fn hash(&self, key: impl AsRef<[u8]>) -> Result<u64> {
        Ok(self.config.hasher.hash(key.as_ref())?)
    }

    // ------------------------------------------------------------------
    // Load ledger
    // ------------------------------------------------------------------

    /// Adds one unit of load to `host`.
    ///
    /// # Errors
    ///
    /// [`Error::HostNotFound`] for unknown hosts, [`Error::LoadOverflow`] if
    /// the total load would overflow; the ledger is left unchanged.
    pub fn increase_load(&self, host: &str) -> Result<()> {
        self.ledger
            .write()
            .increase(host)
            .map(|_| ())
    }

    /// Removes one unit of load from `host`. A host at load 0 stays at 0.
    pub fn decrease_load(&self, host: &str) -> Result<()> {
        self.ledger
            .write()
            .decrease(host)
            .map(|_| ())
    }

    /// Sets the load of `host` to `value`, adjusting the total by the
    /// difference.
    ///
    /// # Errors
    ///
    /// [`Error::HostNotFound`] for unknown hosts, [`Error::LoadOverflow`] if
    /// the new total would not fit in a `u64`; the ledger is left unchanged.
    pub fn update_load(&self, host: &str, value: u64) -> Result<()> {
        self.ledger
            .write()
            .update(host, value)
            .map(|_| ())
    }

    /// Point-in-time snapshot of every host's load.
    pub fn get_loads(&self) -> HashMap<String, u64> {
        self.ledger.read().snapshot()
    }

    /// Current load of `host`.
    pub fn load(&self, host: &str) -> Result<u64> {
        self.ledger
            .read()
            .load(host)
            .ok_or_else(|| Error::host_not_found(host))
    }

    /// Sum of every host's load.
    pub fn total_load(&self) -> u64 {
        self.ledger.read().total()
    }

    /// Current per-host load ceiling:
    /// `ceil(max(1, total_load / host_count) * load_factor)`.
    ///
    /// Computed from live state on every call.
    pub fn max_load(&self) -> u64 {
        let topology = self.topology.read();
        let ledger = self.ledger.read();
        ledger.max_load(topology.host_count(), self.config.load_factor)
    }

    /// True if `host` exists and its load is strictly below [`max_load`].
    ///
    /// [`max_load`]: Self::max_load
    pub fn load_ok(&self, host: &str) -> bool {
        let topology = self.topology.read();
        let ledger = self.ledger.read();
        let max_load = ledger.max_load(topology.host_count(), self.config.load_factor);
        ledger.load(host).map_or(false, |load| load < max_load)
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    /// True if `host` is on the ring.
    pub fn contains(&self, host: &str) -> bool {
        self.topology.read().contains(host)
    }

    /// Number of hosts on the ring.
    pub fn host_count(&self) -> usize {
        self.topology.read().host_count()
    }

    /// Number of virtual nodes on the ring (`R * host_count`).
    pub fn vnode_count(&self) -> usize {
        self.topology.read().vnodes().len()
    }

    /// True if the ring has no hosts.
    pub fn is_empty(&self) -> bool {
        self.topology.read().is_empty()
    }

    /// Sorted snapshot of every virtual node (for debugging).
    pub fn vnodes(&self) -> Vec<VirtualNode> {
        self.topology.read().vnodes().to_vec()
    }

    /// The resolved configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Virtual nodes per host.
    pub fn replication_factor(&self) -> usize {
        self.config.replication_factor
    }

    /// The load bound multiplier (alpha).
    pub fn load_factor(&self) -> f64 {
        self.config.load_factor
    }

    /// Name of the configured hash function.
    pub fn hasher_name(&self) -> &'static str {
        self.config.hasher.name()
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::with_defaults()
    }
}
