//! Command handlers.
//!
//! Each handler prints its result to stdout and returns a typed error, leaving
//! the exit status to the binary.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{
    CheckCommand, Cli, Command, ConfigCommand, FiltersCommand, MapCommand, OutputFormat,
    ShowCommand,
};
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::index::SystemIndex;
use crate::render::{MapView, SystemCard};
use crate::view::{compose, FilterOptions, Layout};

/// Execute a parsed command line.
///
/// Configuration is only loaded for commands that need it, so `config
/// validate --file` still runs when the default configuration is broken.
///
/// # Errors
///
/// Returns an error if the configuration or catalog cannot be loaded, a
/// system is not found, or a strict check finds issues.
pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        catalog,
        command,
        ..
    } = cli;

    match command {
        Command::Config(cmd) => handle_config(config_path, cmd),
        Command::Check(cmd) => {
            let config = Config::load_from(config_path)?;
            cmd_check(&config.catalog_path(catalog.as_ref()), &cmd)
        }
        Command::Map(cmd) => {
            let (config, index) = load_index(config_path, catalog.as_ref())?;
            cmd_map(&config, &index, &cmd)
        }
        Command::Filters(cmd) => {
            let (config, index) = load_index(config_path, catalog.as_ref())?;
            cmd_filters(&config, &index, &cmd)
        }
        Command::Show(cmd) => {
            let (config, index) = load_index(config_path, catalog.as_ref())?;
            cmd_show(&config, &index, &cmd)
        }
    }
}

fn load_index(
    config_path: Option<PathBuf>,
    catalog: Option<&PathBuf>,
) -> Result<(Config, SystemIndex)> {
    let config = Config::load_from(config_path)?;
    let index = SystemIndex::load(
        config.catalog_path(catalog),
        config.catalog.warn_on_issues,
    )?;
    Ok((config, index))
}

/// Print the filtered, grouped map view.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn cmd_map(config: &Config, index: &SystemIndex, cmd: &MapCommand) -> Result<()> {
    let filter = cmd.filter();
    filter.warn_unknown(index.dictionary());

    let layout = cmd.layout.map_or(config.view.layout, Layout::from);
    let map_data = compose(index, &filter, layout);

    match OutputFormat::resolve(cmd.format, config.view.json) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&map_data)?),
        OutputFormat::Plain => {
            let details = cmd.details || config.view.show_details;
            print!("{}", MapView::new(&map_data).with_details(details));
        }
    }
    Ok(())
}

/// Print the available filter options.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn cmd_filters(config: &Config, index: &SystemIndex, cmd: &FiltersCommand) -> Result<()> {
    let options = FilterOptions::from_dictionary(index.dictionary());

    match OutputFormat::resolve(cmd.format, config.view.json) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
        OutputFormat::Plain => {
            println!("Data Categories");
            println!("===============");
            for option in &options.categories {
                println!("  {:<40} {}", option.value, option.label);
            }
            println!();
            println!("Data Uses");
            println!("=========");
            for option in &options.data_uses {
                println!("  {}", option.value);
            }
            println!();
            println!("Layouts");
            println!("=======");
            for option in &options.layouts {
                println!("  {:<40} {}", option.value, option.label);
            }
        }
    }
    Ok(())
}

/// Print a single system card with all details.
///
/// # Errors
///
/// Returns [`Error::SystemNotFound`] for an unknown fides key.
pub fn cmd_show(config: &Config, index: &SystemIndex, cmd: &ShowCommand) -> Result<()> {
    let system = index
        .get(&cmd.fides_key)
        .ok_or_else(|| Error::system_not_found(&cmd.fides_key))?;

    match OutputFormat::resolve(cmd.format, config.view.json) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(system)?),
        OutputFormat::Plain => print!("{}", SystemCard::new(system).with_details(true)),
    }
    Ok(())
}

/// Check the catalog and list its issues.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, or
/// [`Error::CatalogIssues`] when `strict` is set and issues were found.
pub fn cmd_check(catalog_path: &Path, cmd: &CheckCommand) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let issues = catalog.validate();

    println!("Catalog:       {}", catalog_path.display());
    println!("Systems:       {}", catalog.len());
    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    println!("Issues:        {}", issues.len());
    for issue in &issues {
        println!("  - {issue}");
    }

    if cmd.strict {
        return Err(Error::CatalogIssues {
            count: issues.len(),
        });
    }
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Catalog]");
                println!("  Path:               {}", config.catalog.path.display());
                println!("  Warn on issues:     {}", config.catalog.warn_on_issues);
                println!();
                println!("[View]");
                println!("  Layout:             {}", config.view.layout);
                println!("  Show details:       {}", config.view.show_details);
                println!("  JSON output:        {}", config.view.json);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            cmd_validate_config(&path)?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

/// Validate a configuration file. Unlike [`Config::load_from`], a missing
/// file is an error here.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] if the file does not exist, or the load
/// or validation error otherwise.
pub fn cmd_validate_config(path: &Path) -> Result<Config> {
    if !path.is_file() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    debug!("Validating configuration at {}", path.display());
    Config::load_from(Some(path.to_path_buf()))
}
