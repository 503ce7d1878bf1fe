//! Ring search and clockwise walks over sorted virtual nodes.
//!
//! These are pure functions over a sorted slice; locking is the caller's job.

use crate::vnode::VirtualNode;

/// Index of the first virtual node at or after `hash`, wrapping to 0 when
/// `hash` is past the last position.
///
/// `vnodes` must be sorted and non-empty.
///
/// For positions `[10, 20, 30]`: hash 25 gives index 2, hash 30 gives 2,
/// hash 31 wraps to 0.
pub fn successor(vnodes: &[VirtualNode], hash: u64) -> usize {
    let index = vnodes.partition_point(|vnode| vnode.position < hash);
    if index == vnodes.len() {
        0
    } else {
        index
    }
}

/// Clockwise walk visiting every virtual node exactly once, starting at
/// `start`.
pub fn walk<'a>(
    vnodes: &'a [VirtualNode],
    start: usize,
) -> impl Iterator<Item = &'a VirtualNode> + 'a {
    vnodes[start..].iter().chain(vnodes[..start].iter())
}

/// Picks the least-loaded host among those strictly below `max_load`.
///
/// Hosts are considered in walk order, so ties go to the host closest to the
/// start of the walk. A host met again on a later virtual node only replaces
/// the best pick with a strictly lower load, so revisits never change the
/// result. Returns `None` when every host is at or above the bound.
/// `load_of` returns `None` for hosts without a ledger entry, which are skipped.
pub fn least_loaded<'a, I, F>(walk: I, max_load: u64, mut load_of: F) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a VirtualNode>,
    F: FnMut(&str) -> Option<u64>,
{
    let mut best: Option<(&'a str, u64)> = None;

    for vnode in walk {
        let host: &'a str = &vnode.owner;
        let Some(load) = load_of(host) else {
            continue;
        };
        if load >= max_load {
            continue;
        }
        if best.map_or(true, |(_, min)| load < min) {
            best = Some((host, load));
            if load == 0 {
                // Nothing can beat an idle host.
                break;
            }
        }
    }

    best.map(|(host, _)| host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn ring(entries: &[(u64, &str)]) -> Vec<VirtualNode> {
        let mut vnodes: Vec<_> = entries
            .iter()
            .map(|(pos, owner)| VirtualNode::new(*pos, Arc::from(*owner)))
            .collect();
        vnodes.sort();
        vnodes
    }

    #[test]
    fn test_successor() {
        let vnodes = ring(&[(10, "a"), (20, "b"), (30, "c")]);
        assert_eq!(successor(&vnodes, 0), 0);
        assert_eq!(successor(&vnodes, 10), 0);
        assert_eq!(successor(&vnodes, 11), 1);
        assert_eq!(successor(&vnodes, 25), 2);
        assert_eq!(successor(&vnodes, 30), 2);
        assert_eq!(successor(&vnodes, 31), 0); // wraps
        assert_eq!(successor(&vnodes, u64::MAX), 0);
    }

    #[test]
    fn test_walk_wraps_once() {
        let vnodes = ring(&[(10, "a"), (20, "b"), (30, "c")]);
        let order: Vec<u64> = walk(&vnodes, 1).map(|v| v.position).collect();
        assert_eq!(order, vec![20, 30, 10]);
    }

    #[test]
    fn test_least_loaded_prefers_minimum() {
        let vnodes = ring(&[(10, "a"), (20, "b"), (30, "c")]);
        let loads: HashMap<&str, u64> = [("a", 3), ("b", 2), ("c", 1)].into();
        let host = least_loaded(walk(&vnodes, 0), 10, |h| loads.get(h).copied());
        assert_eq!(host, Some("c"));
    }

    #[test]
    fn test_least_loaded_ties_go_to_walk_order() {
        let vnodes = ring(&[(10, "a"), (20, "b"), (30, "c")]);
        let loads: HashMap<&str, u64> = [("a", 2), ("b", 2), ("c", 2)].into();
        let host = least_loaded(walk(&vnodes, 2), 10, |h| loads.get(h).copied());
        assert_eq!(host, Some("c"));
        let host = least_loaded(walk(&vnodes, 1), 10, |h| loads.get(h).copied());
        assert_eq!(host, Some("b"));
    }

    #[test]
    fn test_least_loaded_revisited_hosts_keep_first_tie() {
        let vnodes = ring(&[(10, "a"), (20, "b"), (30, "a"), (40, "b"), (50, "c")]);
        let loads: HashMap<&str, u64> = [("a", 2), ("b", 2), ("c", 3)].into();
        let host = least_loaded(walk(&vnodes, 1), 10, |h| loads.get(h).copied());
        assert_eq!(host, Some("b"));
        let host = least_loaded(walk(&vnodes, 4), 10, |h| loads.get(h).copied());
        assert_eq!(host, Some("a"));
    }

    #[test]
    fn test_least_loaded_skips_saturated_hosts() {
        let vnodes = ring(&[(10, "a"), (20, "b")]);
        let loads: HashMap<&str, u64> = [("a", 1), ("b", 4)].into();
        let host = least_loaded(walk(&vnodes, 1), 4, |h| loads.get(h).copied());
        assert_eq!(host, Some("a"));
    }

    #[test]
    fn test_least_loaded_none_when_all_saturated() {
        let vnodes = ring(&[(10, "a"), (20, "b")]);
        let host = least_loaded(walk(&vnodes, 0), 0, |_| Some(0));
        assert_eq!(host, None);
    }

    #[test]
    fn test_least_loaded_skips_unknown_hosts() {
        let vnodes = ring(&[(10, "ghost"), (20, "b")]);
        let host = least_loaded(walk(&vnodes, 0), 5, |h| (h == "b").then_some(4));
        assert_eq!(host, Some("b"));
    }
}
