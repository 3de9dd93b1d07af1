//! TACO command-line tools
//!
//! The `taco` binary wraps the streaming table operations:
//!
//! - `taco combine FILE...`: group constraint maps by key
//! - `taco match INDEX MAP`: join a rule-table index against a constraint map
//! - `taco select [FILE]`: check and normalise a feature-selection table
//!
//! Diagnostics go to stderr through `tracing`; set `TACO_LOG` (for example
//! `TACO_LOG=taco_merge=debug`) or pass `-v` to see them.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

use anyhow::{bail, Result};
use clap::ArgMatches;
use config::{CombineConfig, MatchConfig, SelectConfig};

/// Dispatch parsed arguments to the matching subcommand
///
/// # Errors
/// Returns the subcommand's failure
pub fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("combine", sub)) => {
            commands::run_combine(&CombineConfig::from_matches(sub))?;
        }
        Some(("match", sub)) => {
            commands::run_match(&MatchConfig::from_matches(sub))?;
        }
        Some(("select", sub)) => {
            commands::run_select(&SelectConfig::from_matches(sub))?;
        }
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
    Ok(())
}
