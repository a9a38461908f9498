//! Filtering and grouping of indexed systems.
//!
//! The map view narrows the system list with a [`FilterModel`] and then
//! groups what is left along a [`Layout`] dimension.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::index::{Dictionary, System, SystemIndex};

/// The grouping dimension of the map view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// One group per system type.
    #[default]
    SystemType,
    /// One group per data use. A system shows up once per data use it declares.
    DataUse,
}

impl Layout {
    /// All layouts, in the order the view offers them.
    pub const ALL: [Layout; 2] = [Layout::SystemType, Layout::DataUse];

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::SystemType => "System Type",
            Self::DataUse => "Data Use",
        }
    }

    /// The stable identifier, as used in config files and on the command line.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SystemType => "system-type",
            Self::DataUse => "data-use",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a layout name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLayout(pub String);

impl fmt::Display for UnknownLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown layout '{}', expected 'system-type' or 'data-use'",
            self.0
        )
    }
}

impl std::error::Error for UnknownLayout {}

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|layout| layout.as_str() == s)
            .ok_or_else(|| UnknownLayout(s.to_string()))
    }
}

/// The user's current filter selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterModel {
    /// Category ids that a system must all declare. Empty means no filter.
    pub categories: Vec<String>,
    /// Data use a system must declare. `None` or empty means no filter.
    pub data_use: Option<String>,
}

impl FilterModel {
    /// Create a filter from a category selection and an optional data use.
    #[must_use]
    pub fn new(categories: Vec<String>, data_use: Option<String>) -> Self {
        Self {
            categories,
            data_use,
        }
    }

    /// The selected data use, treating an empty string as no selection.
    #[must_use]
    pub fn selected_data_use(&self) -> Option<&str> {
        self.data_use.as_deref().filter(|u| !u.is_empty())
    }

    /// Whether the filter lets every system through.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.selected_data_use().is_none()
    }

    /// Whether a single system passes the filter.
    #[must_use]
    pub fn matches(&self, system: &System) -> bool {
        let categories_match = self
            .categories
            .iter()
            .all(|category| system.has_category(category));
        if !categories_match {
            return false;
        }

        self.selected_data_use()
            .map_or(true, |data_use| system.has_data_use(data_use))
    }

    /// Log selections that no system in the dictionary can ever match.
    pub fn warn_unknown(&self, dictionary: &Dictionary) {
        for category in &self.categories {
            if dictionary.category(category).is_none() {
                warn!(category = %category, "Filtering by a category no system declares");
            }
        }
        if let Some(data_use) = self.selected_data_use() {
            if !dictionary.has_data_use(data_use) {
                warn!(data_use = %data_use, "Filtering by a data use no system declares");
            }
        }
    }
}

/// Grouped systems: group key to the systems in it, in first-seen order.
pub type MapData<'a> = IndexMap<String, Vec<&'a System>>;

/// Keep the systems that pass the filter, preserving order.
#[must_use]
pub fn filter_systems<'a>(systems: &'a [System], filter: &FilterModel) -> Vec<&'a System> {
    systems.iter().filter(|system| filter.matches(system)).collect()
}

/// Group systems along the given layout.
#[must_use]
pub fn group_systems<'a>(layout: Layout, systems: &[&'a System]) -> MapData<'a> {
    let mut map_data: MapData<'a> = IndexMap::new();

    match layout {
        Layout::SystemType => {
            for system in systems {
                map_data
                    .entry(system.system_type.clone())
                    .or_default()
                    .push(*system);
            }
        }
        Layout::DataUse => {
            for system in systems {
                for data_use in system.data_use_map.keys() {
                    map_data.entry(data_use.clone()).or_default().push(*system);
                }
            }
        }
    }

    map_data
}

/// Filter the indexed systems, then group them.
#[must_use]
pub fn compose<'a>(index: &'a SystemIndex, filter: &FilterModel, layout: Layout) -> MapData<'a> {
    let filtered = filter_systems(index.systems(), filter);
    let map_data = group_systems(layout, &filtered);
    debug!(
        %layout,
        matched = filtered.len(),
        groups = map_data.len(),
        "Map view composed"
    );
    map_data
}

/// A selectable option in the filter panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// The value passed back as a filter.
    pub value: String,
    /// What the user sees.
    pub label: String,
}

/// Everything the filter panel offers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    /// Category options, value is the id and label the display name.
    pub categories: Vec<FilterOption>,
    /// Data use options.
    pub data_uses: Vec<FilterOption>,
    /// Layout options.
    pub layouts: Vec<FilterOption>,
}

impl FilterOptions {
    /// Derive the options from the dictionary, in dictionary order.
    #[must_use]
    pub fn from_dictionary(dictionary: &Dictionary) -> Self {
        Self {
            categories: dictionary
                .data_categories
                .values()
                .map(|category| FilterOption {
                    value: category.id.clone(),
                    label: category.name.clone(),
                })
                .collect(),
            data_uses: dictionary
                .data_uses
                .values()
                .map(|data_use| FilterOption {
                    value: data_use.clone(),
                    label: data_use.clone(),
                })
                .collect(),
            layouts: Layout::ALL
                .into_iter()
                .map(|layout| FilterOption {
                    value: layout.as_str().to_string(),
                    label: layout.label().to_string(),
                })
                .collect(),
        }
    }
}
