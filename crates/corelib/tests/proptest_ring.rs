// Test code is allowed to panic on failure
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property-based tests for the bounded-load ring.
//!
//! Uses proptest to generate host sets and operation sequences and checks
//! the ring's invariants after each one.

use std::collections::HashMap;

use corelib::{Error, Ring, RingBuilder};
use proptest::prelude::*;

/// Ledger and topology operations against a small pool of host names.
#[derive(Debug, Clone)]
enum Op {
    Add(usize),
    Remove(usize),
    Increase(usize),
    Decrease(usize),
    Update(usize, u64),
    Dispatch(u16),
}

const POOL: usize = 6;

fn host(index: usize) -> String {
    format!("host-{}", index % POOL)
}

fn any_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..POOL).prop_map(Op::Add),
        (0..POOL).prop_map(Op::Remove),
        (0..POOL).prop_map(Op::Increase),
        (0..POOL).prop_map(Op::Decrease),
        ((0..POOL), 0u64..50).prop_map(|(h, v)| Op::Update(h, v)),
        any::<u16>().prop_map(Op::Dispatch),
    ]
}

fn apply(ring: &Ring, op: &Op) {
    match op {
        Op::Add(h) => ring.add(&host(*h)).unwrap(),
        Op::Remove(h) => {
            let existed = ring.contains(&host(*h));
            let result = ring.remove(&host(*h));
            assert_eq!(result.is_ok(), existed);
        }
        Op::Increase(h) => {
            let _ = ring.increase_load(&host(*h));
        }
        Op::Decrease(h) => {
            let _ = ring.decrease_load(&host(*h));
        }
        Op::Update(h, v) => {
            let _ = ring.update_load(&host(*h), *v);
        }
        Op::Dispatch(key) => match ring.get_least(key.to_string()) {
            Ok(chosen) => ring.increase_load(&chosen).unwrap(),
            Err(err) => assert_eq!(err, Error::NoHostAvailable),
        },
    }
}

fn small_ring() -> Ring {
    RingBuilder::new()
        .with_replication_factor(8)
        .build()
        .unwrap()
}

proptest! {
    /// Property: total load always equals the sum of per-host loads, and the
    /// ring always holds R virtual nodes per host.
    #[test]
    fn prop_ledger_and_topology_stay_consistent(ops in prop::collection::vec(any_op(), 1..80)) {
        let ring = small_ring();
        for op in &ops {
            apply(&ring, op);

            let loads = ring.get_loads();
            prop_assert_eq!(ring.total_load(), loads.values().sum::<u64>());
            prop_assert_eq!(loads.len(), ring.host_count());
            prop_assert_eq!(ring.vnode_count(), ring.host_count() * 8);
        }
    }

    /// Property: adding then removing a new host restores hosts and loads.
    #[test]
    fn prop_add_remove_round_trip(
        ops in prop::collection::vec(any_op(), 0..40),
        extra in "[a-z]{1,8}",
    ) {
        let ring = small_ring();
        for op in &ops {
            apply(&ring, op);
        }
        let extra = format!("extra-{}", extra);
        let hosts: Vec<String> = ring.hosts();
        let loads: HashMap<String, u64> = ring.get_loads();

        ring.add(&extra).unwrap();
        ring.remove(&extra).unwrap();

        prop_assert_eq!(ring.hosts(), hosts);
        prop_assert_eq!(ring.get_loads(), loads);
    }

    /// Property: adding the same host twice equals adding it once.
    #[test]
    fn prop_idempotent_add(name in "[a-z0-9]{1,12}", load in 0u64..100) {
        let ring = small_ring();
        ring.add(&name).unwrap();
        ring.update_load(&name, load).unwrap();
        let vnodes = ring.vnodes();

        ring.add(&name).unwrap();

        prop_assert_eq!(ring.host_count(), 1);
        prop_assert_eq!(ring.vnodes(), vnodes);
        prop_assert_eq!(ring.load(&name).unwrap(), load);
    }

    /// Property: same ring, same key, same host.
    #[test]
    fn prop_get_is_deterministic(
        hosts in prop::collection::hash_set("[a-z]{3,6}", 1..8),
        key in any::<Vec<u8>>(),
    ) {
        let ring = RingBuilder::new().add_hosts(hosts.iter().cloned()).build().unwrap();
        let first = ring.get(&key).unwrap();
        prop_assert!(hosts.contains(&first));
        prop_assert_eq!(ring.get(&key).unwrap(), first);
    }

    /// Property: a host chosen by get_least never ends above the bound that
    /// was in force when it was chosen.
    #[test]
    fn prop_get_least_respects_bound(
        host_count in 1usize..8,
        preload in prop::collection::vec(0u64..20, 8),
        keys in prop::collection::vec(any::<u32>(), 1..200),
    ) {
        let ring = RingBuilder::new()
            .with_replication_factor(10)
            .add_hosts((0..host_count).map(host))
            .build()
            .unwrap();
        for (i, load) in preload.iter().take(host_count).enumerate() {
            ring.update_load(&host(i), *load).unwrap();
        }

        for key in keys {
            let bound = ring.max_load();
            let chosen = ring.get_least(key.to_string()).unwrap();
            prop_assert!(ring.load_ok(&chosen));
            ring.increase_load(&chosen).unwrap();
            prop_assert!(ring.load(&chosen).unwrap() <= bound);
        }
    }
}
