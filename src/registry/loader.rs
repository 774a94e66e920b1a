//! Command loading
//!
//! Turns one discovered file into a command. Loading never fails across this
//! boundary: a command that cannot be built becomes a [`LoadFailure`] value.

use crate::console::Command;
use crate::discovery::{derive_name, prefix_depth, CommandDescriptor};
use crate::registry::catalog::{Catalog, CatalogEntry};
use std::fmt;
use std::path::PathBuf;

/// A command that could not be built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub type_name: String,
    pub source_path: PathBuf,
    pub message: String,
}

impl LoadFailure {
    /// Lines of the diagnostic block written for this failure
    pub fn diagnostic(&self) -> Vec<String> {
        vec![
            format!(
                "Unable to load {} from {}",
                self.type_name,
                self.source_path.display()
            ),
            " ".to_string(),
            self.message.clone(),
        ]
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unable to load {} from {}: {}",
            self.type_name,
            self.source_path.display(),
            self.message
        )
    }
}

/// Why a discovered file did not produce a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The type path is not in the catalog
    Unresolved,
    /// The type is abstract
    Abstract,
    /// The type is not a command
    NotACommand,
}

/// Result of loading one discovered file
pub enum LoadOutcome {
    Registered(Box<dyn Command>),
    Skipped(SkipReason),
    Failed(LoadFailure),
}

impl fmt::Debug for LoadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOutcome::Registered(cmd) => write!(f, "Registered({})", cmd.name()),
            LoadOutcome::Skipped(reason) => write!(f, "Skipped({:?})", reason),
            LoadOutcome::Failed(failure) => write!(f, "Failed({})", failure),
        }
    }
}

/// Builds commands for discovered files from a catalog
pub struct Loader<'a> {
    catalog: &'a Catalog,
    depth: usize,
}

impl<'a> Loader<'a> {
    /// Create a loader for commands under a root namespace
    pub fn new(catalog: &'a Catalog, namespace: &str) -> Self {
        Loader {
            catalog,
            depth: prefix_depth(namespace),
        }
    }

    /// Try to build the command for a discovered file
    ///
    /// The factory receives the derived name and the command keeps whatever
    /// name the factory gave it.
    pub fn try_load(&self, descriptor: &CommandDescriptor) -> LoadOutcome {
        let factory = match self.catalog.resolve(descriptor.type_name()) {
            Some(CatalogEntry::Command(factory)) => factory,
            Some(CatalogEntry::Abstract) => return LoadOutcome::Skipped(SkipReason::Abstract),
            Some(CatalogEntry::Helper) => return LoadOutcome::Skipped(SkipReason::NotACommand),
            None => return LoadOutcome::Skipped(SkipReason::Unresolved),
        };

        let name = derive_name(descriptor.type_name(), self.depth);
        match factory(&name) {
            Ok(command) => {
                tracing::debug!("loaded {} as {}", descriptor.type_name(), command.name());
                LoadOutcome::Registered(command)
            }
            Err(e) => {
                tracing::warn!("unable to load {}: {}", descriptor.type_name(), e);
                LoadOutcome::Failed(LoadFailure {
                    type_name: descriptor.type_name().to_string(),
                    source_path: descriptor.source_path().to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }
}
