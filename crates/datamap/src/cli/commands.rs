//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::view::{FilterModel, Layout};

/// Map command arguments.
#[derive(Debug, Args)]
pub struct MapCommand {
    /// Only show systems declaring this data category (repeatable, all must match)
    #[arg(short = 'C', long = "category", value_name = "ID")]
    pub categories: Vec<String>,

    /// Only show systems declaring this data use
    #[arg(short = 'u', long, value_name = "USE")]
    pub data_use: Option<String>,

    /// Grouping dimension (defaults to the configured layout)
    #[arg(short, long, value_enum)]
    pub layout: Option<LayoutArg>,

    /// Show description, declarations, data uses and dependencies
    #[arg(short, long)]
    pub details: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl MapCommand {
    /// The filter selected on the command line.
    #[must_use]
    pub fn filter(&self) -> FilterModel {
        FilterModel::new(self.categories.clone(), self.data_use.clone())
    }
}

/// Filters command arguments.
#[derive(Debug, Args)]
pub struct FiltersCommand {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Fides key of the system
    pub fides_key: String,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Check command arguments.
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Exit with an error when any issue is found
    #[arg(long)]
    pub strict: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Layout argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LayoutArg {
    /// Group by system type
    SystemType,
    /// Group by data use
    DataUse,
}

impl From<LayoutArg> for Layout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::SystemType => Self::SystemType,
            LayoutArg::DataUse => Self::DataUse,
        }
    }
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

impl OutputFormat {
    /// Resolve an optional command-line format against the configured default.
    #[must_use]
    pub fn resolve(arg: Option<Self>, json_by_default: bool) -> Self {
        arg.unwrap_or(if json_by_default { Self::Json } else { Self::Plain })
    }
}
