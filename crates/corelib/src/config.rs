//! Ring configuration.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::hash::{KeyHasher, Xxh3Hasher};

/// Virtual nodes per host when none (or zero) is requested.
pub const DEFAULT_REPLICATION_FACTOR: usize = 10;

/// Load factor used when the requested one is not above 1.0.
pub const DEFAULT_LOAD_FACTOR: f64 = 1.25;

/// Ring parameters. Immutable once the ring is built.
///
/// Out-of-range values are replaced by defaults in [`Config::resolve`]:
/// a `replication_factor` of 0 becomes 10 and a `load_factor <= 1.0`
/// becomes 1.25. A non-finite load factor is rejected instead.
///
/// The hash function cannot come from a settings file; when deserialized
/// the config always uses [`Xxh3Hasher`].
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Virtual nodes per host (R).
    pub replication_factor: usize,
    /// Multiplier on the average load that bounds each host (alpha).
    pub load_factor: f64,
    /// Hash function used for keys and virtual-node labels.
    #[serde(skip, default = "default_hasher")]
    pub hasher: Arc<dyn KeyHasher>,
}

fn default_hasher() -> Arc<dyn KeyHasher> {
    Arc::new(Xxh3Hasher)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            replication_factor: DEFAULT_REPLICATION_FACTOR,
            load_factor: DEFAULT_LOAD_FACTOR,
            hasher: default_hasher(),
        }
    }
}

impl Config {
    /// Creates a config with the given parameters and the default hasher.
    pub fn new(replication_factor: usize, load_factor: f64) -> Self {
        Self {
            replication_factor,
            load_factor,
            ..Self::default()
        }
    }

    /// Replaces the hash function.
    pub fn with_hasher(mut self, hasher: impl KeyHasher) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }

    /// Applies defaults to out-of-range values.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if `load_factor` is NaN or infinite.
    pub fn resolve(mut self) -> Result<Self> {
        if !self.load_factor.is_finite() {
            return Err(Error::Config(format!(
                "load factor must be finite, got {}",
                self.load_factor
            )));
        }
        if self.replication_factor == 0 {
            self.replication_factor = DEFAULT_REPLICATION_FACTOR;
        }
        if self.load_factor <= 1.0 {
            self.load_factor = DEFAULT_LOAD_FACTOR;
        }
        Ok(self)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("replication_factor", &self.replication_factor)
            .field("load_factor", &self.load_factor)
            .field("hasher", &self.hasher.name())
            .finish()
    }
}
