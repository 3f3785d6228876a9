//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Assemble the RPL Arduino library package.
///
/// Copies the core headers into the package tree, fetches the third-party
/// header-only dependencies, and writes the aggregating entry header.
#[derive(Parser, Debug)]
#[command(
    name = "rpl-arduino-sync",
    about = "Assemble the RPL Arduino library package",
    version = option_env!("RPL_SYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Override the project root directory (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}
