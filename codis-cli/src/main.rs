//! Binary crate for the `codis` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive session-cookie configuration
//! - Surfacing download results and exit codes

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cmd = cli::Cli::parse();
    cmd.run()
}
