//! Per-host load counters and the cluster-wide total.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Outstanding work per host.
///
/// Every mutation adjusts one host's load and `total` together, so
/// `total == loads.values().sum()` whenever the ledger is observable.
#[derive(Debug, Default, Clone)]
pub struct LoadLedger {
    loads: HashMap<Arc<str>, u64>,
    total: u64,
}

impl LoadLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `host` at load 0.
    pub fn insert(&mut self, host: Arc<str>) {
        self.loads.entry(host).or_insert(0);
    }

    /// Stops tracking `host`, taking its load out of the total.
    pub fn remove(&mut self, host: &str) -> Option<u64> {
        let load = self.loads.remove(host)?;
        self.total -= load;
        Some(load)
    }

    /// Adds one unit of load and returns the new load.
    ///
    /// # Errors
    ///
    /// [`Error::HostNotFound`] for unknown hosts, [`Error::LoadOverflow`] if
    /// the total would no longer fit in a `u64`.
    pub fn increase(&mut self, host: &str) -> Result<u64> {
        let load = self
            .loads
            .get_mut(host)
            .ok_or_else(|| Error::host_not_found(host))?;
        let total = self
            .total
            .checked_add(1)
            .ok_or_else(|| Error::LoadOverflow(host.to_owned()))?;
        // A host's load never exceeds the total, so this cannot overflow.
        *load += 1;
        self.total = total;
        Ok(*load)
    }

    /// Removes one unit of load, stopping at zero, and returns the new load.
    pub fn decrease(&mut self, host: &str) -> Result<u64> {
        let load = self
            .loads
            .get_mut(host)
            .ok_or_else(|| Error::host_not_found(host))?;
        if *load > 0 {
            *load -= 1;
            self.total -= 1;
        }
        Ok(*load)
    }

    /// Sets the load of `host` to `value` and returns the previous load.
    ///
    /// Nothing is written unless the new total fits in a `u64`.
    ///
    /// # Errors
    ///
    /// [`Error::HostNotFound`] for unknown hosts, [`Error::LoadOverflow`] if
    /// the new total would overflow.
    pub fn update(&mut self, host: &str, value: u64) -> Result<u64> {
        let load = self
            .loads
            .get_mut(host)
            .ok_or_else(|| Error::host_not_found(host))?;
        let total = (self.total - *load)
            .checked_add(value)
            .ok_or_else(|| Error::LoadOverflow(host.to_owned()))?;
        let previous = std::mem::replace(load, value);
        self.total = total;
        Ok(previous)
    }

    pub fn load(&self, host: &str) -> Option<u64> {
        self.loads.get(host).copied()
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// The per-host load ceiling:
    /// `ceil(max(1, total / host_count) * load_factor)`.
    ///
    /// `host_count` of zero is treated as one.
    pub fn max_load(&self, host_count: usize, load_factor: f64) -> u64 {
        let hosts = host_count.max(1) as f64;
        let average = (self.total as f64 / hosts).max(1.0);
        (average * load_factor).ceil() as u64
    }

    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.loads
            .iter()
            .map(|(host, load)| (host.to_string(), *load))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.loads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }
}
