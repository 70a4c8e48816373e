//! # viosync
//!
//! **CLI Binary**
//!
//! Entry point for the `viosync` command-line application.
//!
//! ## Responsibilities
//! * Parse command line arguments
//! * Set up logging and load `.env`
//! * Load configuration and credentials
//! * Dispatch commands to their handlers
//! * Handle errors and exit codes
//!
//! Grouping, fingerprinting and reconciliation live in `viosync-core`.

mod commands;
mod config;
mod error_hints;
mod logging;

use anyhow::Result;
use clap::Parser;
use viosync_config::Cli;

/// Parse arguments from the process and run the requested command.
pub fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(cli.global.verbose);
    commands::dispatch(cli)
}

/// Render an error chain plus any hints for stderr.
pub fn format_error(err: &anyhow::Error) -> String {
    error_hints::format(err)
}
