//! Command registry
//!
//! This module builds the set of commands an application runs with: the
//! catalog of known types, the loader that builds one command per
//! discovered file, and the registry the results end up in.

pub mod catalog;
pub mod loader;

// Re-export main types
pub use catalog::*;
pub use loader::*;

use crate::config::DiscoveryConfig;
use crate::console::{Command, Output, Style};
use crate::discovery::{CommandDescriptor, Walker};
use crate::error::Result;
use std::collections::BTreeMap;

/// Names the console shell keeps for itself
pub const RESERVED_NAMES: &[&str] = &["help"];

/// Whether a command name is kept by the console shell
pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

/// Registered commands, keyed and ordered by name
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<String, Box<dyn Command>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a command under its own name
    ///
    /// A command whose name is already taken is handed back.
    pub fn insert(&mut self, command: Box<dyn Command>) -> std::result::Result<(), Box<dyn Command>> {
        if self.commands.contains_key(command.name()) {
            return Err(command);
        }
        self.commands.insert(command.name().to_string(), command);
        Ok(())
    }

    /// Register a command, replacing any command of the same name
    pub fn replace(&mut self, command: Box<dyn Command>) -> Option<Box<dyn Command>> {
        self.commands.insert(command.name().to_string(), command)
    }

    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Command> {
        self.commands.values().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Summary of one discovery pass
#[derive(Debug, Clone, Default)]
pub struct DiscoveryReport {
    /// Names of the commands registered by this pass, sorted
    pub registered: Vec<String>,

    /// Commands that could not be built
    pub failures: Vec<LoadFailure>,

    /// Files that do not hold a buildable command
    pub skipped: Vec<CommandDescriptor>,

    /// Number of command files found
    pub scanned: usize,
}

/// Discover the commands of a directory and register them
///
/// The configuration is validated before the directory is read. Files that
/// cannot be mapped to a type path abort the pass; a command that cannot be
/// built is reported to `output` as soon as it is found and left out, and
/// the pass carries on with the next file. A command whose name is already
/// registered, or reserved by the shell, is reported the same way.
pub fn discover(
    config: &DiscoveryConfig,
    catalog: &Catalog,
    registry: &mut Registry,
    output: &mut dyn Output,
) -> Result<DiscoveryReport> {
    let mut walker = Walker::new(config)?;
    let loader = Loader::new(catalog, config.namespace().unwrap_or_default());
    let mut report = DiscoveryReport::default();

    for descriptor in walker.by_ref() {
        let descriptor = descriptor?;
        match loader.try_load(&descriptor) {
            LoadOutcome::Registered(command) => {
                let name = command.name().to_string();
                let rejected = if is_reserved(&name) {
                    Some(format!("Command name '{}' is reserved", name))
                } else {
                    registry
                        .insert(command)
                        .err()
                        .map(|_| format!("Command name '{}' is already registered", name))
                };

                match rejected {
                    None => report.registered.push(name),
                    Some(message) => fail(
                        &mut report,
                        output,
                        LoadFailure {
                            type_name: descriptor.type_name().to_string(),
                            source_path: descriptor.source_path().to_path_buf(),
                            message,
                        },
                    ),
                }
            }
            LoadOutcome::Skipped(reason) => {
                tracing::debug!("skipping {} ({:?})", descriptor.type_name(), reason);
                report.skipped.push(descriptor);
            }
            LoadOutcome::Failed(failure) => fail(&mut report, output, failure),
        }
    }

    report.scanned = walker.scanned();
    report.registered.sort();
    tracing::debug!(
        "discovered {} commands ({} failed, {} skipped)",
        report.registered.len(),
        report.failures.len(),
        report.skipped.len()
    );

    Ok(report)
}

/// Write the diagnostic block of a failure
pub(crate) fn report_failure(output: &mut dyn Output, failure: &LoadFailure) {
    output.block(&failure.diagnostic(), Style::Error);
}

fn fail(report: &mut DiscoveryReport, output: &mut dyn Output, failure: LoadFailure) {
    report_failure(output, &failure);
    report.failures.push(failure);
}
