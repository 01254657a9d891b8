//! Binary crate for the `calc` command-line calculator.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive keypad prompt
//! - Rendering the display and keypad

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run()
}
