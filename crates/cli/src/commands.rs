//! Subcommands and their results.

use std::collections::BTreeMap;
use std::fmt;

use anyhow::Context;
use clap::Subcommand;
use corelib::Ring;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show where each key lands, with and without load bounding.
    ///
    /// Each bounded assignment adds one unit of load, like a dispatcher would.
    Lookup {
        /// Hosts to place on the ring.
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        /// Keys to look up.
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Assign `key0..keyN` and report the resulting load per host.
    Simulate {
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        /// Number of keys to assign.
        #[arg(long, default_value_t = 10_000)]
        keys: usize,
        /// Use plain consistent hashing instead of bounded loads.
        #[arg(long)]
        unbounded: bool,
    },
    /// Measure how many keys move when one host leaves.
    Churn {
        #[arg(long = "host", required = true)]
        hosts: Vec<String>,
        #[arg(long, default_value_t = 10_000)]
        keys: usize,
        /// Host to remove.
        #[arg(long)]
        remove: String,
    },
}

/// One key's placement.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub key: String,
    pub host: String,
    pub bounded_host: String,
}

/// Output of a subcommand.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Lookup {
        assignments: Vec<Assignment>,
    },
    Simulate {
        bounded: bool,
        loads: BTreeMap<String, u64>,
        max_load: u64,
        /// Busiest host's load divided by the mean.
        peak_to_mean: f64,
    },
    Churn {
        removed: String,
        keys: usize,
        moved: usize,
        moved_fraction: f64,
    },
}

impl Command {
    /// Runs the command against an empty `ring`.
    pub fn execute(&self, ring: &Ring) -> anyhow::Result<CommandResult> {
        match self {
            Command::Lookup { hosts, keys } => {
                add_hosts(ring, hosts)?;
                let assignments = keys
                    .iter()
                    .map(|key| -> anyhow::Result<Assignment> {
                        let host = ring.get(key)?;
                        let bounded_host = ring.get_least(key)?;
                        ring.increase_load(&bounded_host)?;
                        Ok(Assignment {
                            key: key.clone(),
                            host,
                            bounded_host,
                        })
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?;
                Ok(CommandResult::Lookup { assignments })
            }
            Command::Simulate {
                hosts,
                keys,
                unbounded,
            } => {
                add_hosts(ring, hosts)?;
                for i in 0..*keys {
                    let key = format!("key{}", i);
                    let host = if *unbounded {
                        ring.get(&key)?
                    } else {
                        ring.get_least(&key)?
                    };
                    ring.increase_load(&host)?;
                }

                let loads: BTreeMap<String, u64> = ring.get_loads().into_iter().collect();
                let mean = ring.total_load() as f64 / loads.len().max(1) as f64;
                let peak = loads.values().copied().max().unwrap_or(0) as f64;
                let peak_to_mean = if mean > 0.0 { peak / mean } else { 0.0 };
                info!(keys, bounded = !unbounded, peak_to_mean, "simulation finished");

                Ok(CommandResult::Simulate {
                    bounded: !unbounded,
                    loads,
                    max_load: ring.max_load(),
                    peak_to_mean,
                })
            }
            Command::Churn {
                hosts,
                keys,
                remove,
            } => {
                add_hosts(ring, hosts)?;
                let sample: Vec<String> = (0..*keys).map(|i| format!("key{}", i)).collect();
                let before = sample
                    .iter()
                    .map(|key| ring.get(key))
                    .collect::<Result<Vec<_>, _>>()?;

                ring.remove(remove)
                    .with_context(|| format!("removing host {}", remove))?;

                let mut moved = 0usize;
                for (key, old) in sample.iter().zip(&before) {
                    if ring.get(key)? != *old {
                        moved += 1;
                    }
                }
                let moved_fraction = moved as f64 / (*keys).max(1) as f64;
                info!(removed = %remove, moved, "churn measured");

                Ok(CommandResult::Churn {
                    removed: remove.clone(),
                    keys: *keys,
                    moved,
                    moved_fraction,
                })
            }
        }
    }
}

fn add_hosts(ring: &Ring, hosts: &[String]) -> anyhow::Result<()> {
    for host in hosts {
        ring.add(host)
            .with_context(|| format!("adding host {}", host))?;
    }
    Ok(())
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Lookup { assignments } => {
                for a in assignments {
                    writeln!(f, "{:<24} get={:<16} get_least={}", a.key, a.host, a.bounded_host)?;
                }
                Ok(())
            }
            CommandResult::Simulate {
                bounded,
                loads,
                max_load,
                peak_to_mean,
            } => {
                let mode = if *bounded { "bounded" } else { "unbounded" };
                writeln!(f, "mode: {}", mode)?;
                for (host, load) in loads {
                    writeln!(f, "  {:<24} {}", host, load)?;
                }
                writeln!(f, "max_load: {}", max_load)?;
                writeln!(f, "peak/mean: {:.3}", peak_to_mean)
            }
            CommandResult::Churn {
                removed,
                keys,
                moved,
                moved_fraction,
            } => writeln!(
                f,
                "removed {}: {}/{} keys moved ({:.2}%)",
                removed,
                moved,
                keys,
                moved_fraction * 100.0
            ),
        }
    }
}
