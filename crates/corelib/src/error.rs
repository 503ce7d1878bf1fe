//! Error types for the core library.

use crate::hash::HashError;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Every failing operation leaves the ring exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The ring has no hosts, so no key can be placed.
    #[error("no host available: the ring is empty")]
    NoHostAvailable,

    /// The named host is not part of the ring.
    #[error("host not found: {0}")]
    HostNotFound(String),

    /// The configured hash function could not process its input.
    #[error("hashing failed: {0}")]
    Hashing(#[from] HashError),

    /// A load change would push the total load past `u64::MAX`.
    #[error("load overflow on host {0}")]
    LoadOverflow(String),

    /// Configuration that cannot be defaulted into a usable value.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn host_not_found(host: &str) -> Self {
        Error::HostNotFound(host.to_owned())
    }
}
