//! Ring topology: the sorted virtual nodes and the host list.
//!
//! `Topology` is plain data with no locking of its own. The ring keeps it
//! behind a single `RwLock` so lookups never see a half-applied add or remove.

use std::sync::Arc;

use crate::hash::{HashError, KeyHasher};
use crate::ring::position;
use crate::vnode::VirtualNode;

/// Virtual nodes (sorted by position) plus the hosts that own them.
///
/// # Invariants
///
/// - `vnodes` is sorted and holds exactly `R` entries per host
/// - every vnode owner appears in `hosts`, and every host owns `R` vnodes
#[derive(Debug, Default, Clone)]
pub struct Topology {
    vnodes: Vec<VirtualNode>,
    /// Insertion order is preserved so `hosts()` is stable.
    hosts: Vec<Arc<str>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `host` with `replication_factor` virtual nodes.
    ///
    /// Returns `Ok(None)` if the host is already present. Every position is
    /// hashed before anything is inserted, so a hashing failure leaves the
    /// topology untouched.
    pub fn add(
        &mut self,
        host: &str,
        hasher: &dyn KeyHasher,
        replication_factor: usize,
    ) -> Result<Option<Arc<str>>, HashError> {
        if self.contains(host) {
            return Ok(None);
        }

        let owner: Arc<str> = Arc::from(host);
        let placed = (0..replication_factor)
            .map(|index| VirtualNode::from_index(hasher, &owner, index))
            .collect::<Result<Vec<_>, _>>()?;

        self.vnodes.extend(placed);
        self.vnodes.sort_unstable();
        self.hosts.push(Arc::clone(&owner));
        Ok(Some(owner))
    }

    /// Removes `host` and all of its virtual nodes. Returns `false` if the
    /// host was not present.
    pub fn remove(&mut self, host: &str) -> bool {
        let Some(index) = self.hosts.iter().position(|h| &**h == host) else {
            return false;
        };
        self.hosts.remove(index);
        self.vnodes.retain(|vnode| &*vnode.owner != host);
        true
    }

    /// Owner of the first virtual node clockwise from `hash`.
    pub fn owner_of(&self, hash: u64) -> Option<&Arc<str>> {
        if self.vnodes.is_empty() {
            return None;
        }
        let index = position::successor(&self.vnodes, hash);
        Some(&self.vnodes[index].owner)
    }

    /// Clockwise walk over every virtual node, starting at the successor of
    /// `hash`. Empty if the ring is empty.
    pub fn walk_from(&self, hash: u64) -> impl Iterator<Item = &VirtualNode> + '_ {
        let start = if self.vnodes.is_empty() {
            0
        } else {
            position::successor(&self.vnodes, hash)
        };
        position::walk(&self.vnodes, start)
    }

    pub fn contains(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| &**h == host)
    }

    pub fn hosts(&self) -> &[Arc<str>] {
        &self.hosts
    }

    pub fn vnodes(&self) -> &[VirtualNode] {
        &self.vnodes
    }

    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
