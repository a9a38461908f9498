//! Raw catalog records.
//!
//! A catalog is a JSON array of system records, each carrying the privacy
//! declarations that tie it to data categories and data uses. This module only
//! deserializes and sanity-checks the records; normalization happens in
//! [`crate::index`].

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// A single privacy declaration attached to a system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyDeclarationRecord {
    /// Human readable description of the declaration.
    pub name: String,

    /// Data category ids, dot separated (e.g. `user.contact.email`).
    #[serde(default)]
    pub data_categories: Vec<String>,

    /// The data use this declaration covers (e.g. `improve.system`).
    pub data_use: String,

    /// Data subjects the declaration applies to.
    #[serde(default)]
    pub data_subjects: Vec<String>,

    /// Optional data qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_qualifier: Option<String>,
}

/// A system as it appears in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemRecord {
    /// Unique key of the system.
    pub fides_key: String,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: String,

    /// System type, used as a grouping dimension.
    pub system_type: String,

    /// Privacy declarations of the system.
    #[serde(default)]
    pub privacy_declarations: Vec<PrivacyDeclarationRecord>,

    /// Fides keys of the systems this one depends on.
    #[serde(default)]
    pub system_dependencies: Vec<String>,
}

impl SystemRecord {
    /// All data categories across the system's declarations, in declaration
    /// order. Duplicates are kept.
    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.privacy_declarations
            .iter()
            .flat_map(|declaration| declaration.data_categories.iter().map(String::as_str))
    }

    /// The data use of each declaration, in declaration order.
    pub fn data_uses(&self) -> impl Iterator<Item = &str> + '_ {
        self.privacy_declarations
            .iter()
            .map(|declaration| declaration.data_use.as_str())
    }
}

/// A problem found while checking a catalog. None of these stop indexing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Two or more records share a fides key.
    DuplicateKey {
        /// The repeated key.
        fides_key: String,
    },

    /// A dependency points at a key that no record has.
    UnknownDependency {
        /// The system declaring the dependency.
        fides_key: String,
        /// The missing key.
        dependency: String,
    },

    /// A system has no privacy declarations, so it has no categories or uses.
    NoDeclarations {
        /// The system in question.
        fides_key: String,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { fides_key } => {
                write!(f, "fides key '{fides_key}' is used by more than one system")
            }
            Self::UnknownDependency {
                fides_key,
                dependency,
            } => write!(
                f,
                "system '{fides_key}' depends on unknown system '{dependency}'"
            ),
            Self::NoDeclarations { fides_key } => {
                write!(f, "system '{fides_key}' has no privacy declarations")
            }
        }
    }
}

/// The loaded catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    records: Vec<SystemRecord>,
}

impl Catalog {
    /// Build a catalog from already parsed records.
    #[must_use]
    pub fn from_records(records: Vec<SystemRecord>) -> Self {
        Self { records }
    }

    /// Load a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogRead`] if the file cannot be read and
    /// [`Error::CatalogParse`] if it is not a valid array of system records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading catalog from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| Error::CatalogRead {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<SystemRecord> =
            serde_json::from_str(&contents).map_err(|source| Error::CatalogParse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(systems = records.len(), "Catalog loaded");
        Ok(Self { records })
    }

    /// Parse a catalog from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the string is not a valid array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records = serde_json::from_str(json)?;
        Ok(Self { records })
    }

    /// The records, in file order.
    #[must_use]
    pub fn records(&self) -> &[SystemRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Check the catalog for problems that degrade the view.
    #[must_use]
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();

        for record in &self.records {
            if !seen.insert(record.fides_key.as_str())
                && reported.insert(record.fides_key.as_str())
            {
                issues.push(CatalogIssue::DuplicateKey {
                    fides_key: record.fides_key.clone(),
                });
            }
        }

        for record in &self.records {
            if record.privacy_declarations.is_empty() {
                issues.push(CatalogIssue::NoDeclarations {
                    fides_key: record.fides_key.clone(),
                });
            }

            for dependency in &record.system_dependencies {
                if !seen.contains(dependency.as_str()) {
                    issues.push(CatalogIssue::UnknownDependency {
                        fides_key: record.fides_key.clone(),
                        dependency: dependency.clone(),
                    });
                }
            }
        }

        issues
    }
}
