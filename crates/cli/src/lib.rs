//! CLI tool for exploring bounded-load consistent hashing.
//!
//! Provides commands for:
//! - Looking up keys with and without load bounding
//! - Simulating load distribution over many keys
//! - Measuring key movement when a host leaves

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
