//! `datamap` - CLI for browsing a catalog of systems
//!
//! This binary loads the configured catalog and prints the filtered, grouped
//! map view, the available filter options, or a single system card.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;

use datamap::cli::{run, Cli};
use datamap::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}
