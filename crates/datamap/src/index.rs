//! Catalog indexing.
//!
//! Turns the raw catalog records into two normalized structures:
//!
//! - a [`Dictionary`] of every data category, data use and system name found
//!   in the catalog, deduplicated in first-seen order, and
//! - one [`System`] per record, carrying membership maps so that filtering is
//!   a key lookup instead of a scan over declarations.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, SystemRecord};
use crate::error::Result;

/// A data category with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Full dotted id, e.g. `user.contact.email`.
    pub id: String,
    /// Display name, the last segment of the id.
    pub name: String,
}

impl Category {
    /// Create a category from its id, deriving the display name.
    #[must_use]
    pub fn from_id(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: category_display_name(id).to_string(),
        }
    }
}

/// The display name of a category id: the part after the last `.`.
///
/// ```
/// assert_eq!(datamap::index::category_display_name("user.contact.email"), "email");
/// assert_eq!(datamap::index::category_display_name("user"), "user");
/// ```
#[must_use]
pub fn category_display_name(id: &str) -> &str {
    id.rsplit('.').next().unwrap_or(id)
}

/// Shared lookup tables derived from the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dictionary {
    /// Category id to category, first-seen order.
    pub data_categories: IndexMap<String, Category>,
    /// Data use to data use, first-seen order.
    pub data_uses: IndexMap<String, String>,
    /// Fides key to system name, first-seen order.
    pub dependencies: IndexMap<String, String>,
}

impl Dictionary {
    /// Build the dictionary from a catalog.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let mut dictionary = Self::default();

        for category in catalog.records().iter().flat_map(SystemRecord::categories) {
            if !dictionary.data_categories.contains_key(category) {
                dictionary
                    .data_categories
                    .insert(category.to_string(), Category::from_id(category));
            }
        }

        for data_use in catalog.records().iter().flat_map(SystemRecord::data_uses) {
            if !dictionary.data_uses.contains_key(data_use) {
                dictionary
                    .data_uses
                    .insert(data_use.to_string(), data_use.to_string());
            }
        }

        // Last record's name wins when keys repeat; position stays first-seen.
        for record in catalog.records() {
            dictionary
                .dependencies
                .insert(record.fides_key.clone(), record.name.clone());
        }

        debug!(
            categories = dictionary.data_categories.len(),
            data_uses = dictionary.data_uses.len(),
            systems = dictionary.dependencies.len(),
            "Dictionary built"
        );
        dictionary
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.data_categories.get(id)
    }

    /// Whether a data use is known.
    #[must_use]
    pub fn has_data_use(&self, data_use: &str) -> bool {
        self.data_uses.contains_key(data_use)
    }

    /// The system name for a fides key.
    #[must_use]
    pub fn system_name(&self, fides_key: &str) -> Option<&str> {
        self.dependencies.get(fides_key).map(String::as_str)
    }
}

/// A normalized system, ready for filtering and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct System {
    /// Unique key.
    pub fides_key: String,
    /// Display name.
    pub name: String,
    /// System type.
    pub system_type: String,
    /// Description.
    pub description: String,
    /// Category id to display name.
    pub data_categories_map: IndexMap<String, String>,
    /// Data use to data use.
    pub data_use_map: IndexMap<String, String>,
    /// Names of the privacy declarations.
    pub privacy_declarations: Vec<String>,
    /// Names of the systems this one depends on.
    pub system_dependencies: Vec<String>,
}

impl System {
    fn from_record(record: &SystemRecord, dictionary: &Dictionary) -> Self {
        let mut data_categories_map = IndexMap::new();
        for category in record.categories() {
            let name = dictionary.category(category).map_or_else(
                || category_display_name(category).to_string(),
                |c| c.name.clone(),
            );
            data_categories_map
                .entry(category.to_string())
                .or_insert(name);
        }

        let mut data_use_map = IndexMap::new();
        for data_use in record.data_uses() {
            data_use_map
                .entry(data_use.to_string())
                .or_insert_with(|| data_use.to_string());
        }

        let system_dependencies = record
            .system_dependencies
            .iter()
            .map(|key| match dictionary.system_name(key) {
                Some(name) => name.to_string(),
                None => {
                    debug!(
                        system = %record.fides_key,
                        dependency = %key,
                        "Unresolved dependency, showing raw key"
                    );
                    key.clone()
                }
            })
            .collect();

        Self {
            fides_key: record.fides_key.clone(),
            name: record.name.clone(),
            system_type: record.system_type.clone(),
            description: record.description.clone(),
            data_categories_map,
            data_use_map,
            privacy_declarations: record
                .privacy_declarations
                .iter()
                .map(|declaration| declaration.name.clone())
                .collect(),
            system_dependencies,
        }
    }

    /// Whether the system declares the given category id.
    #[must_use]
    pub fn has_category(&self, id: &str) -> bool {
        self.data_categories_map.contains_key(id)
    }

    /// Whether the system declares the given data use.
    #[must_use]
    pub fn has_data_use(&self, data_use: &str) -> bool {
        self.data_use_map.contains_key(data_use)
    }

    /// Category display names, in first-seen order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.data_categories_map.values().map(String::as_str)
    }

    /// Data uses, in first-seen order.
    pub fn data_use_names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.data_use_map.values().map(String::as_str)
    }
}

/// The indexed catalog: dictionary plus systems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemIndex {
    dictionary: Dictionary,
    systems: Vec<System>,
}

impl SystemIndex {
    /// Index a catalog.
    #[must_use]
    pub fn build(catalog: &Catalog) -> Self {
        let dictionary = Dictionary::build(catalog);
        let systems = catalog
            .records()
            .iter()
            .map(|record| System::from_record(record, &dictionary))
            .collect();

        Self {
            dictionary,
            systems,
        }
    }

    /// Load a catalog file and index it, logging any catalog issues when
    /// `warn_on_issues` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>, warn_on_issues: bool) -> Result<Self> {
        let catalog = Catalog::load(path)?;
        if warn_on_issues {
            for issue in catalog.validate() {
                warn!("{issue}");
            }
        }

        let index = Self::build(&catalog);
        info!(systems = index.systems.len(), "Catalog indexed");
        Ok(index)
    }

    /// All systems, in catalog order.
    #[must_use]
    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    /// The shared dictionary.
    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Find a system by fides key. The first match wins.
    #[must_use]
    pub fn get(&self, fides_key: &str) -> Option<&System> {
        self.systems.iter().find(|s| s.fides_key == fides_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::{declaration, record};

    fn sample_catalog() -> Catalog {
        Catalog::from_records(vec![
            record(
                "analytics",
                "Service",
                vec![
                    declaration(
                        "Analyze behaviour",
                        &["user.contact", "user.device.cookie_id"],
                        "improve.system",
                    ),
                    declaration("Ads", &["user.device.cookie_id"], "advertising"),
                ],
                &["marketing"],
            ),
            record(
                "marketing",
                "Application",
                vec![declaration(
                    "Marketing",
                    &["user.contact.email"],
                    "advertising",
                )],
                &["ghost"],
            ),
        ])
    }

    #[test]
    fn test_category_display_name() {
        assert_eq!(category_display_name("user.contact.email"), "email");
        assert_eq!(category_display_name("user"), "user");
        assert_eq!(category_display_name(""), "");
        assert_eq!(category_display_name("user."), "");
    }

    #[test]
    fn test_dictionary_categories_dedup_in_order() {
        let dictionary = Dictionary::build(&sample_catalog());
        let ids: Vec<&String> = dictionary.data_categories.keys().collect();
        assert_eq!(
            ids,
            vec!["user.contact", "user.device.cookie_id", "user.contact.email"]
        );
        assert_eq!(
            dictionary.category("user.device.cookie_id"),
            Some(&Category {
                id: "user.device.cookie_id".to_string(),
                name: "cookie_id".to_string(),
            })
        );
    }

    #[test]
    fn test_dictionary_data_uses_dedup_in_order() {
        let dictionary = Dictionary::build(&sample_catalog());
        let uses: Vec<&String> = dictionary.data_uses.values().collect();
        assert_eq!(uses, vec!["improve.system", "advertising"]);
        assert!(dictionary.has_data_use("advertising"));
        assert!(!dictionary.has_data_use("provide"));
    }

    #[test]
    fn test_dictionary_dependencies_last_wins() {
        let mut first = record("dup", "Service", vec![], &[]);
        first.name = "First".to_string();
        let mut second = record("dup", "Service", vec![], &[]);
        second.name = "Second".to_string();

        let dictionary = Dictionary::build(&Catalog::from_records(vec![first, second]));
        assert_eq!(dictionary.system_name("dup"), Some("Second"));
        assert_eq!(dictionary.system_name("other"), None);
    }

    #[test]
    fn test_duplicate_key_get_returns_first_system() {
        let mut first = record("dup", "Service", vec![], &[]);
        first.name = "First".to_string();
        let mut second = record("dup", "Database", vec![], &[]);
        second.name = "Second".to_string();
        let dependent = record("client", "Application", vec![], &["dup"]);

        let index = SystemIndex::build(&Catalog::from_records(vec![first, second, dependent]));
        assert_eq!(index.systems().len(), 3);

        let found = index.get("dup").unwrap();
        assert_eq!(found.name, "First");
        assert_eq!(found.system_type, "Service");

        // Name lookups go through the dictionary, where the last record wins.
        assert_eq!(index.dictionary().system_name("dup"), Some("Second"));
        assert_eq!(
            index.get("client").unwrap().system_dependencies,
            vec!["Second".to_string()]
        );
    }

    #[test]
    fn test_dictionary_serializes_in_catalog_order() {
        let keys = ["zeta", "alpha", "mu", "beta", "omega", "gamma"];
        let records = keys
            .iter()
            .map(|key| record(key, "Service", vec![], &[]))
            .collect();
        let dictionary = Dictionary::build(&Catalog::from_records(records));

        let json = serde_json::to_string(&dictionary.dependencies).unwrap();
        let positions: Vec<usize> = keys
            .iter()
            .map(|key| json.find(&format!("\"{key}\":")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{json}");
    }

    #[test]
    fn test_system_membership_maps() {
        let index = SystemIndex::build(&sample_catalog());
        let analytics = index.get("analytics").unwrap();

        let categories: Vec<&str> = analytics.category_names().collect();
        assert_eq!(categories, vec!["contact", "cookie_id"]);
        assert!(analytics.has_category("user.device.cookie_id"));
        assert!(!analytics.has_category("user.contact.email"));

        let uses: Vec<&str> = analytics.data_use_names().collect();
        assert_eq!(uses, vec!["improve.system", "advertising"]);
        assert!(analytics.has_data_use("advertising"));

        assert_eq!(
            analytics.privacy_declarations,
            vec!["Analyze behaviour".to_string(), "Ads".to_string()]
        );
    }

    #[test]
    fn test_system_dependencies_resolved_to_names() {
        let index = SystemIndex::build(&sample_catalog());
        assert_eq!(
            index.get("analytics").unwrap().system_dependencies,
            vec!["marketing name".to_string()]
        );
        // Unknown keys fall back to the raw key.
        assert_eq!(
            index.get("marketing").unwrap().system_dependencies,
            vec!["ghost".to_string()]
        );
    }

    #[test]
    fn test_system_maps_agree_with_dictionary() {
        let index = SystemIndex::build(&sample_catalog());
        let dictionary = index.dictionary();

        for system in index.systems() {
            for (id, name) in &system.data_categories_map {
                assert_eq!(&dictionary.category(id).unwrap().name, name);
            }
            for data_use in system.data_use_map.keys() {
                assert!(dictionary.has_data_use(data_use));
            }
        }
    }

    #[test]
    fn test_systems_keep_catalog_order() {
        let index = SystemIndex::build(&sample_catalog());
        let keys: Vec<&str> = index.systems().iter().map(|s| s.fides_key.as_str()).collect();
        assert_eq!(keys, vec!["analytics", "marketing"]);
    }

    #[test]
    fn test_system_without_declarations() {
        let catalog = Catalog::from_records(vec![record("empty", "Service", vec![], &[])]);
        let index = SystemIndex::build(&catalog);
        let system = index.get("empty").unwrap();

        assert!(system.data_categories_map.is_empty());
        assert!(system.data_use_map.is_empty());
        assert!(system.privacy_declarations.is_empty());
    }

    #[test]
    fn test_empty_catalog() {
        let index = SystemIndex::build(&Catalog::default());
        assert!(index.systems().is_empty());
        assert!(index.dictionary().data_categories.is_empty());
        assert!(index.get("anything").is_none());
    }
}
