//! `datamap` - a filterable, groupable view over a catalog of systems
//!
//! This library loads a catalog of systems and their privacy declarations,
//! indexes the data categories and data uses they declare, and composes the
//! filtered, grouped map view rendered by the `datamap` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod render;
pub mod view;

pub use catalog::{Catalog, CatalogIssue, PrivacyDeclarationRecord, SystemRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use index::{Category, Dictionary, System, SystemIndex};
pub use logging::init_logging;
pub use render::{MapView, SystemCard};
pub use view::{compose, FilterModel, FilterOptions, Layout, MapData};
