//! Binary entry point for `rpl-arduino-sync`.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use rpl_arduino_sync::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = Arc::new(logging::Logger::new());

    commands::sync::run(&args, &log)
}
