//! Command-line interface for datamap.
//!
//! This module provides the CLI structure and command handlers for the
//! `datamap` binary.

mod commands;
mod handlers;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CheckCommand, ConfigCommand, FiltersCommand, LayoutArg, MapCommand, OutputFormat,
    ShowCommand,
};
pub use handlers::{cmd_check, cmd_filters, cmd_map, cmd_show, cmd_validate_config, run};

/// datamap - Browse the systems in a privacy catalog
///
/// Loads a catalog of systems and their privacy declarations, then lists them
/// filtered by data category and data use, grouped by system type or data use.
#[derive(Debug, Parser)]
#[command(name = "datamap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog file to load (overrides the configured path)
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the systems, filtered and grouped
    Map(MapCommand),

    /// List the available filter options
    Filters(FiltersCommand),

    /// Show a single system card with all details
    Show(ShowCommand),

    /// Check the catalog for problems
    Check(CheckCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::Verbosity;
    use clap::CommandFactory;

    #[test]
    fn test_cli_name() {
        let cli = Cli::command();
        assert_eq!(cli.get_name(), "datamap");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_map_defaults() {
        let cli = Cli::try_parse_from(["datamap", "map"]).unwrap();
        let Command::Map(cmd) = cli.command else {
            panic!("expected map command");
        };
        assert!(cmd.categories.is_empty());
        assert!(cmd.data_use.is_none());
        assert!(cmd.layout.is_none());
        assert!(!cmd.details);
        assert!(cmd.format.is_none());
    }

    #[test]
    fn test_parse_map_with_filters() {
        let cli = Cli::try_parse_from([
            "datamap",
            "map",
            "--category",
            "user.contact",
            "-C",
            "user.device.cookie_id",
            "--data-use",
            "advertising",
            "--layout",
            "data-use",
            "--details",
            "--format",
            "json",
        ])
        .unwrap();
        let Command::Map(cmd) = cli.command else {
            panic!("expected map command");
        };
        assert_eq!(
            cmd.categories,
            vec!["user.contact".to_string(), "user.device.cookie_id".to_string()]
        );
        assert_eq!(cmd.data_use.as_deref(), Some("advertising"));
        assert_eq!(cmd.layout, Some(LayoutArg::DataUse));
        assert!(cmd.details);
        assert_eq!(cmd.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_parse_show() {
        let cli = Cli::try_parse_from(["datamap", "show", "demo_analytics_system"]).unwrap();
        let Command::Show(cmd) = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(cmd.fides_key, "demo_analytics_system");
    }

    #[test]
    fn test_parse_show_requires_key() {
        assert!(Cli::try_parse_from(["datamap", "show"]).is_err());
    }

    #[test]
    fn test_parse_unknown_layout_fails() {
        assert!(Cli::try_parse_from(["datamap", "map", "--layout", "columns"]).is_err());
    }

    #[test]
    fn test_parse_global_catalog_after_subcommand() {
        let cli = Cli::try_parse_from(["datamap", "filters", "--catalog", "/srv/catalog.json"])
            .unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("/srv/catalog.json")));
        assert!(matches!(cli.command, Command::Filters(_)));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = Cli::try_parse_from(["datamap", "-c", "/custom/config.toml", "check"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["datamap", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["datamap", "-q", "check"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
