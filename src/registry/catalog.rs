//! Command catalog
//!
//! The catalog maps type paths to what lives there. Application startup code
//! fills it with one entry per type in the commands directory; discovery
//! then looks up each discovered file here instead of inspecting types at
//! runtime.

use crate::console::Command;
use crate::discovery::NAMESPACE_SEPARATOR;
use crate::error::BuildError;
use std::collections::HashMap;
use std::fmt;

/// Builds a command given its derived name
pub type Factory = Box<dyn Fn(&str) -> Result<Box<dyn Command>, BuildError>>;

/// What a type path resolves to
pub enum CatalogEntry {
    /// A concrete command and the factory that builds it
    Command(Factory),

    /// An abstract base that cannot be built
    Abstract,

    /// A type that is not a command (shared helpers and the like)
    Helper,
}

impl fmt::Debug for CatalogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogEntry::Command(_) => f.write_str("Command(..)"),
            CatalogEntry::Abstract => f.write_str("Abstract"),
            CatalogEntry::Helper => f.write_str("Helper"),
        }
    }
}

/// Table of known types, keyed by type path
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<String, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Register a command factory
    pub fn command<F>(mut self, type_name: &str, factory: F) -> Self
    where
        F: Fn(&str) -> Result<Box<dyn Command>, BuildError> + 'static,
    {
        self.insert(type_name, CatalogEntry::Command(Box::new(factory)));
        self
    }

    /// Register an abstract type
    pub fn abstract_type(mut self, type_name: &str) -> Self {
        self.insert(type_name, CatalogEntry::Abstract);
        self
    }

    /// Register a type that is not a command
    pub fn helper(mut self, type_name: &str) -> Self {
        self.insert(type_name, CatalogEntry::Helper);
        self
    }

    /// Add or replace an entry
    pub fn insert(&mut self, type_name: &str, entry: CatalogEntry) {
        self.entries.insert(normalize(type_name).to_string(), entry);
    }

    /// Look up a type path
    pub fn resolve(&self, type_name: &str) -> Option<&CatalogEntry> {
        self.entries.get(normalize(type_name))
    }

    /// Registered type paths, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(type_name: &str) -> &str {
    type_name.trim_start_matches(NAMESPACE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_entries() {
        let catalog = Catalog::new()
            .abstract_type("app::commands::base")
            .helper("app::commands::util");

        assert!(matches!(
            catalog.resolve("app::commands::base"),
            Some(CatalogEntry::Abstract)
        ));
        assert!(matches!(
            catalog.resolve("::app::commands::util"),
            Some(CatalogEntry::Helper)
        ));
        assert!(catalog.resolve("app::commands::missing").is_none());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_factory_failure_is_returned() {
        let catalog = Catalog::new().command("app::commands::broken", |_| {
            Err(BuildError::MissingDependency("Database".to_string()))
        });

        match catalog.resolve("app::commands::broken") {
            Some(CatalogEntry::Command(factory)) => {
                let err = factory("broken").err().unwrap();
                assert_eq!(err.to_string(), "Unresolvable dependency 'Database'");
            }
            other => panic!("unexpected entry {:?}", other),
        }
    }

    #[test]
    fn test_type_names_are_sorted() {
        let catalog = Catalog::new().helper("b").helper("a").helper("c");
        assert_eq!(catalog.type_names(), vec!["a", "b", "c"]);
    }
}
