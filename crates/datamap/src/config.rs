//! Configuration management for datamap.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::view::Layout;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "datamap";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "DATAMAP_";

/// Separates section and field in environment variable names, so that
/// `DATAMAP_VIEW__SHOW_DETAILS` sets `view.show_details`.
const ENV_SEPARATOR: &str = "__";

/// Default catalog file name, resolved against the working directory.
const CATALOG_FILE_NAME: &str = "catalog.json";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (`DATAMAP_<SECTION>__<FIELD>`)
/// 2. TOML config file at `~/.config/datamap/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog configuration.
    pub catalog: CatalogConfig,
    /// View configuration.
    pub view: ViewConfig,
}

/// Where the catalog lives and how strictly to treat it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file.
    pub path: PathBuf,
    /// Log catalog issues as warnings when loading.
    pub warn_on_issues: bool,
}

/// Defaults for the map view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Grouping used when none is given on the command line.
    pub layout: Layout,
    /// Show card details by default.
    pub show_details: bool,
    /// Output as JSON by default.
    pub json: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(CATALOG_FILE_NAME),
            warn_on_issues: true,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (`DATAMAP_<SECTION>__<FIELD>`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "catalog.path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// The catalog path, with an optional override taking precedence.
    #[must_use]
    pub fn catalog_path(&self, override_path: Option<&PathBuf>) -> PathBuf {
        override_path
            .cloned()
            .unwrap_or_else(|| self.catalog.path.clone())
    }
}
