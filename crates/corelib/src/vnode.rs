//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each host having a single position on the ring, each host owns
//! `R` positions (the replication factor). This provides:
//!
//! 1. **Better Load Distribution**: More positions = smoother spread of keys
//! 2. **Gradual Rebalancing**: When hosts join/leave, only a fraction of keys move
//!
//! Position `i` of host `h` is `hash(h ++ i)`, e.g. `"cache-a3"` for index 3
//! of `cache-a`. Placement is deterministic, so a host always lands on the
//! same positions when it is re-added.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::hash::{HashError, KeyHasher};

/// A virtual node on the hash ring.
///
/// # Invariants
///
/// - Every `VirtualNode` belongs to exactly one host
/// - Virtual nodes order by position, then by owner name, so two hosts
///   colliding on a position still sort deterministically
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VirtualNode {
    /// Position on the ring.
    pub position: u64,

    /// The host that owns this virtual node.
    ///
    /// Shared with the host list, so cloning a vnode never copies the name.
    pub owner: Arc<str>,
}

impl VirtualNode {
    /// Create a new virtual node.
    #[inline]
    pub fn new(position: u64, owner: Arc<str>) -> Self {
        Self { position, owner }
    }

    /// Create the virtual node with index `vnode_index` for `owner`.
    ///
    /// # Errors
    ///
    /// Returns the hasher's error if it cannot process the label.
    ///
    /// # Example
    /// ```rust
    /// use std::sync::Arc;
    /// use corelib::VirtualNode;
    /// use corelib::hash::Xxh3Hasher;
    ///
    /// let owner: Arc<str> = Arc::from("node1");
    /// let vnode0 = VirtualNode::from_index(&Xxh3Hasher, &owner, 0).unwrap();
    /// let vnode1 = VirtualNode::from_index(&Xxh3Hasher, &owner, 1).unwrap();
    /// assert_ne!(vnode0.position, vnode1.position);
    /// ```
    pub fn from_index(
        hasher: &dyn KeyHasher,
        owner: &Arc<str>,
        vnode_index: usize,
    ) -> Result<Self, HashError> {
        let label = format!("{}{}", owner, vnode_index);
        let position = hasher.hash(label.as_bytes())?;
        Ok(Self::new(position, Arc::clone(owner)))
    }

    /// Clockwise distance from this virtual node to `other`, wrapping past
    /// `u64::MAX`.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u64 {
        other.position.wrapping_sub(self.position)
    }
}

impl Ord for VirtualNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position
            .cmp(&other.position)
            .then_with(|| self.owner.cmp(&other.owner))
    }
}

impl PartialOrd for VirtualNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(position={:016x}, owner={})", self.position, self.owner)
    }
}
