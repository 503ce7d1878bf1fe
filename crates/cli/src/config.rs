//! Command-line configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use corelib::hash::{Fnv1aHasher, SipHasher, Xxh3Hasher};
use corelib::{Config, Ring};
use tracing::Level;

use crate::commands::Command;

/// Hash function choices exposed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HasherKind {
    Xxh3,
    Sip,
    Fnv1a,
}

/// Explore consistent hashing with bounded loads.
#[derive(Debug, Parser)]
#[command(name = "bounded-ring", version)]
pub struct CliConfig {
    /// JSON settings file with `replication_factor` and/or `load_factor`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Virtual nodes per host (overrides the settings file).
    #[arg(long, global = true)]
    pub replication_factor: Option<usize>,

    /// Load bound multiplier, must be above 1.0 (overrides the settings file).
    #[arg(long, global = true)]
    pub load_factor: Option<f64>,

    /// Hash function used for keys and virtual nodes.
    #[arg(long, value_enum, default_value_t = HasherKind::Xxh3, global = true)]
    pub hasher: HasherKind,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Maximum tracing level for the chosen verbosity.
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Resolves the ring config: defaults, then the settings file, then flags.
    pub fn ring_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading settings file {}", path.display()))?;
                serde_json::from_str::<Config>(&raw)
                    .with_context(|| format!("parsing settings file {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(replication_factor) = self.replication_factor {
            config.replication_factor = replication_factor;
        }
        if let Some(load_factor) = self.load_factor {
            config.load_factor = load_factor;
        }

        Ok(match self.hasher {
            HasherKind::Xxh3 => config.with_hasher(Xxh3Hasher),
            HasherKind::Sip => config.with_hasher(SipHasher),
            HasherKind::Fnv1a => config.with_hasher(Fnv1aHasher),
        })
    }

    /// Builds an empty ring from the resolved config.
    pub fn build_ring(&self) -> anyhow::Result<Ring> {
        let config = self.ring_config()?;
        Ring::new(config).context("building ring")
    }

    /// Runs the selected subcommand and prints its result.
    pub fn run(&self) -> anyhow::Result<()> {
        let ring = self.build_ring()?;
        let result = self.command.execute(&ring)?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            print!("{}", result);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "bounded-ring",
            "--replication-factor",
            "7",
            "--load-factor",
            "1.5",
            "--hasher",
            "fnv1a",
            "simulate",
            "--host",
            "a",
            "--keys",
            "10",
        ]);
        let ring = cli.build_ring().unwrap();
        assert_eq!(ring.replication_factor(), 7);
        assert_eq!(ring.load_factor(), 1.5);
        assert_eq!(ring.hasher_name(), "fnv1a");
    }

    #[test]
    fn test_settings_file_is_read() {
        let path = std::env::temp_dir().join(format!("bounded-ring-{}.json", std::process::id()));
        fs::write(&path, r#"{ "replication_factor": 42 }"#).unwrap();

        let cli = CliConfig::parse_from([
            "bounded-ring",
            "--config",
            path.to_str().unwrap(),
            "lookup",
            "--host",
            "a",
            "k",
        ]);
        let config = cli.ring_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.replication_factor, 42);
        assert_eq!(config.load_factor, 1.25);
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = CliConfig::parse_from(["bounded-ring", "-vv", "lookup", "--host", "a", "k"]);
        assert_eq!(cli.log_level(), Level::TRACE);
    }
}
