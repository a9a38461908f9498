//! Plain-text rendering of the map view.
//!
//! Each group becomes a section and each system a card listing its data
//! categories, optionally followed by its details.

use std::fmt;

use crate::index::System;
use crate::view::MapData;

/// Shown on a card when a system declares no data categories.
pub const NO_CATEGORIES: &str = "No categories to show";

/// Shown for an empty detail list.
pub const NO_DATA: &str = "No Data";

/// Shown when the filters leave nothing to display.
pub const NO_MATCHES: &str = "No systems match the current filters";

/// A titled list of tags, with a fallback for the empty case.
#[derive(Debug)]
struct TagList<'a, I> {
    title: &'a str,
    tags: I,
    empty: &'a str,
}

impl<'a, I> fmt::Display for TagList<'a, I>
where
    I: Iterator<Item = &'a str> + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.title)?;
        let mut tags = self.tags.clone().peekable();
        if tags.peek().is_none() {
            return f.write_str(self.empty);
        }
        for (i, tag) in tags.enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "[{tag}]")?;
        }
        Ok(())
    }
}

/// A single system card.
#[derive(Debug, Clone, Copy)]
pub struct SystemCard<'a> {
    system: &'a System,
    details: bool,
    indent: usize,
}

impl<'a> SystemCard<'a> {
    /// A card showing the system's categories only.
    #[must_use]
    pub fn new(system: &'a System) -> Self {
        Self {
            system,
            details: false,
            indent: 0,
        }
    }

    /// Also show the description, declarations, data uses and dependencies.
    #[must_use]
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }

    #[must_use]
    fn indented(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl fmt::Display for SystemCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = " ".repeat(self.indent);
        let system = self.system;

        writeln!(f, "{pad}{}", system.name)?;
        writeln!(
            f,
            "{pad}  {}",
            TagList {
                title: "Data Categories",
                tags: system.category_names(),
                empty: NO_CATEGORIES,
            }
        )?;

        if !self.details {
            return Ok(());
        }

        writeln!(f, "{pad}  Details:")?;
        if !system.description.is_empty() {
            writeln!(f, "{pad}    {}", system.description)?;
        }
        writeln!(
            f,
            "{pad}    {}",
            TagList {
                title: "Privacy Declarations",
                tags: system.privacy_declarations.iter().map(String::as_str),
                empty: NO_DATA,
            }
        )?;
        writeln!(
            f,
            "{pad}    {}",
            TagList {
                title: "Data Use",
                tags: system.data_use_names(),
                empty: NO_DATA,
            }
        )?;
        writeln!(
            f,
            "{pad}    {}",
            TagList {
                title: "Dependencies",
                tags: system.system_dependencies.iter().map(String::as_str),
                empty: NO_DATA,
            }
        )
    }
}

/// The whole grouped view.
#[derive(Debug)]
pub struct MapView<'m, 'a> {
    map_data: &'m MapData<'a>,
    details: bool,
}

impl<'m, 'a> MapView<'m, 'a> {
    /// Wrap grouped data for display.
    #[must_use]
    pub fn new(map_data: &'m MapData<'a>) -> Self {
        Self {
            map_data,
            details: false,
        }
    }

    /// Show card details.
    #[must_use]
    pub fn with_details(mut self, details: bool) -> Self {
        self.details = details;
        self
    }
}

impl fmt::Display for MapView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.map_data.is_empty() {
            return writeln!(f, "{NO_MATCHES}");
        }

        for (i, (group, systems)) in self.map_data.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "== {group} ({}) ==", systems.len())?;
            for system in systems {
                writeln!(f)?;
                write!(
                    f,
                    "{}",
                    SystemCard::new(system)
                        .with_details(self.details)
                        .indented(2)
                )?;
            }
        }
        Ok(())
    }
}
