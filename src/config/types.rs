//! Discovery configuration types
//!
//! This module defines the settings that tell an application where its
//! commands live and which namespace their type paths start with.

use std::path::PathBuf;

/// Variable naming the directory that holds command sources
pub const COMMANDS_DIRECTORY_VAR: &str = "COMMANDS_DIRECTORY";

/// Variable naming the root namespace of command type paths
pub const COMMANDS_NAMESPACE_VAR: &str = "COMMANDS_NAMESPACE";

/// Extension of command source files unless configured otherwise
pub const DEFAULT_EXTENSION: &str = "rs";

/// Settings for one discovery pass
///
/// Built once at startup and checked with
/// [`validate_config`](crate::config::validate_config) before any walking
/// begins. The two required values stay optional here so that a missing
/// value can be reported with the variable name it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Identifier used in error messages (usually the application name)
    pub application: String,

    /// Directory the commands directory is resolved against
    pub root: PathBuf,

    /// Commands directory, relative to `root`
    pub commands_directory: Option<String>,

    /// Root namespace, e.g. `app::commands`
    pub commands_namespace: Option<String>,

    /// File extension of command sources, without the dot
    pub extension: String,
}

impl DiscoveryConfig {
    /// Create an empty configuration for an application
    pub fn new(application: impl Into<String>) -> Self {
        DiscoveryConfig {
            application: application.into(),
            root: PathBuf::from("."),
            commands_directory: None,
            commands_namespace: None,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Set the root directory
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Set the commands directory
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.commands_directory = Some(directory.into());
        self
    }

    /// Set the root namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.commands_namespace = Some(namespace.into());
        self
    }

    /// Set the command source extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Path of the commands directory
    ///
    /// The value is always taken relative to `root`: surrounding `/` are
    /// trimmed first, so `/src/commands/` and `src/commands` are the same.
    pub fn commands_path(&self) -> Option<PathBuf> {
        let directory = self.commands_directory.as_deref()?.trim();
        Some(self.root.join(directory.trim_matches('/')))
    }

    /// Configured namespace without leading or trailing separators
    pub fn namespace(&self) -> Option<&str> {
        self.commands_namespace
            .as_deref()
            .map(|ns| ns.trim().trim_matches(':'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config_has_defaults() {
        let config = DiscoveryConfig::new("app");
        assert_eq!(config.application, "app");
        assert_eq!(config.extension, "rs");
        assert!(config.commands_directory.is_none());
        assert!(config.commands_namespace.is_none());
    }

    #[test]
    fn test_commands_path_is_root_relative() {
        let config = DiscoveryConfig::new("app")
            .with_root("/srv/app")
            .with_directory("/src/commands/");
        assert_eq!(
            config.commands_path(),
            Some(PathBuf::from("/srv/app/src/commands"))
        );
    }

    #[test]
    fn test_namespace_is_trimmed() {
        let config = DiscoveryConfig::new("app").with_namespace("::app::commands::");
        assert_eq!(config.namespace(), Some("app::commands"));
    }

    #[test]
    fn test_extension_drops_leading_dot() {
        let config = DiscoveryConfig::new("app").with_extension(".cmd");
        assert_eq!(config.extension, "cmd");
    }
}
