//! Command file discovery
//!
//! Walks the commands directory and maps every command source file to the
//! type path it is expected to define.

use crate::config::{is_identifier, validate_config, DiscoveryConfig};
use crate::discovery::NAMESPACE_SEPARATOR;
use crate::error::{ConfigError, DerivationError, DerivationResult, Result};
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, FilterEntry, WalkDir};

/// A command source file and the type path derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    source_path: PathBuf,
    type_name: String,
}

impl CommandDescriptor {
    pub fn new(source_path: impl Into<PathBuf>, type_name: impl Into<String>) -> Self {
        CommandDescriptor {
            source_path: source_path.into(),
            type_name: type_name.into(),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Lazy walk over the command files of a commands directory
///
/// Yields one [`CommandDescriptor`] per regular file carrying the configured
/// extension. Hidden entries are neither yielded nor descended into, and
/// symbolic links are not followed. Sibling order follows the file system.
pub struct Walker {
    entries: FilterEntry<walkdir::IntoIter, fn(&DirEntry) -> bool>,
    root: PathBuf,
    namespace: String,
    extension: String,
    scanned: usize,
}

impl Walker {
    /// Create a walker for a configuration
    ///
    /// The configuration is validated here, before anything is read from
    /// disk.
    pub fn new(config: &DiscoveryConfig) -> Result<Self> {
        validate_config(config)?;

        let (root, namespace) = match (config.commands_path(), config.namespace()) {
            (Some(root), Some(namespace)) => (root, namespace.to_string()),
            _ => {
                return Err(ConfigError::Invalid(
                    "commands directory and namespace are required".to_string(),
                )
                .into())
            }
        };

        tracing::debug!(
            "walking {} for '{}' command files in {}",
            root.display(),
            config.extension,
            namespace
        );

        let visible: fn(&DirEntry) -> bool = is_visible;
        let entries = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(visible);

        Ok(Walker {
            entries,
            root,
            namespace,
            extension: config.extension.clone(),
            scanned: 0,
        })
    }

    /// Root directory being walked
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of command files yielded so far
    pub fn scanned(&self) -> usize {
        self.scanned
    }
}

impl Iterator for Walker {
    type Item = Result<CommandDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };

            if !entry.file_type().is_file()
                || entry.path().extension().and_then(OsStr::to_str) != Some(self.extension.as_str())
            {
                continue;
            }

            self.scanned += 1;
            let path = entry.into_path();
            let item: Result<CommandDescriptor> = type_name_for(&path, &self.root, &self.namespace)
                .map(|type_name| {
                    tracing::debug!("found {} in {}", type_name, path.display());
                    CommandDescriptor::new(path, type_name)
                })
                .map_err(Into::into);
            return Some(item);
        }
    }
}

/// Entries whose name starts with a dot are skipped (the walk root excepted)
fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0
        || !entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// Map a command file to its type path
///
/// The root prefix and the extension are removed, and the remaining path
/// components become segments under `namespace`.
pub fn type_name_for(path: &Path, root: &Path, namespace: &str) -> DerivationResult<String> {
    let relative = path
        .strip_prefix(root)
        .map_err(|_| DerivationError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?
        .with_extension("");

    let mut segments = vec![namespace.to_string()];
    for component in relative.components() {
        let segment = match component {
            Component::Normal(name) => name
                .to_str()
                .ok_or_else(|| DerivationError::NonUtf8(path.to_path_buf()))?,
            other => {
                return Err(DerivationError::InvalidSegment {
                    path: path.to_path_buf(),
                    segment: other.as_os_str().to_string_lossy().into_owned(),
                })
            }
        };

        if !is_identifier(segment) {
            return Err(DerivationError::InvalidSegment {
                path: path.to_path_buf(),
                segment: segment.to_string(),
            });
        }
        segments.push(segment.to_string());
    }

    if segments.len() == 1 {
        return Err(DerivationError::InvalidSegment {
            path: path.to_path_buf(),
            segment: String::new(),
        });
    }

    Ok(segments.join(NAMESPACE_SEPARATOR))
}

/// Map a type path back to the command file expected to define it
///
/// The inverse of [`type_name_for`]: the namespace prefix is removed and the
/// remaining segments become path components under `root`.
pub fn source_path_for(
    type_name: &str,
    root: &Path,
    namespace: &str,
    extension: &str,
) -> DerivationResult<PathBuf> {
    let outside = || DerivationError::OutsideNamespace {
        type_name: type_name.to_string(),
        namespace: namespace.to_string(),
    };

    let relative = type_name
        .trim_start_matches(NAMESPACE_SEPARATOR)
        .strip_prefix(namespace)
        .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR))
        .ok_or_else(outside)?;

    let mut path = root.to_path_buf();
    for segment in relative.split(NAMESPACE_SEPARATOR) {
        if !is_identifier(segment) {
            return Err(DerivationError::InvalidSegment {
                path: PathBuf::from(type_name),
                segment: segment.to_string(),
            });
        }
        path.push(segment);
    }
    path.set_extension(extension);

    Ok(path)
}

/// Describe the command file for a type path under a configuration
pub fn descriptor_for(config: &DiscoveryConfig, type_name: &str) -> Result<CommandDescriptor> {
    validate_config(config)?;

    let (root, namespace) = match (config.commands_path(), config.namespace()) {
        (Some(root), Some(namespace)) => (root, namespace),
        _ => {
            return Err(ConfigError::Invalid(
                "commands directory and namespace are required".to_string(),
            )
            .into())
        }
    };

    let path = source_path_for(type_name, &root, namespace, &config.extension)?;
    Ok(CommandDescriptor::new(path, type_name.trim_start_matches(NAMESPACE_SEPARATOR)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConsoleError;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn config_for(dir: &TempDir) -> DiscoveryConfig {
        DiscoveryConfig::new("test-app")
            .with_root(dir.path())
            .with_directory("commands")
            .with_namespace("app::commands")
    }

    #[test]
    fn test_type_name_for_nested_file() {
        let name = type_name_for(
            Path::new("/srv/commands/db/run_migrations.rs"),
            Path::new("/srv/commands"),
            "app::commands",
        )
        .unwrap();
        assert_eq!(name, "app::commands::db::run_migrations");
    }

    #[test]
    fn test_type_name_for_outside_root() {
        let result = type_name_for(
            Path::new("/elsewhere/run.rs"),
            Path::new("/srv/commands"),
            "app::commands",
        );
        assert!(matches!(result, Err(DerivationError::OutsideRoot { .. })));
    }

    #[test]
    fn test_type_name_for_invalid_segment() {
        let result = type_name_for(
            Path::new("/srv/commands/run-migrations.rs"),
            Path::new("/srv/commands"),
            "app::commands",
        );
        assert!(matches!(
            result,
            Err(DerivationError::InvalidSegment { ref segment, .. }) if segment == "run-migrations"
        ));
    }

    #[test]
    fn test_walk_yields_matching_files_only() {
        let temp_dir = TempDir::new().unwrap();
        let commands = temp_dir.path().join("commands");
        touch(&commands, "hello.rs");
        touch(&commands, "db/migrate.rs");
        touch(&commands, "db/README.md");
        touch(&commands, ".hidden/secret.rs");
        touch(&commands, "notes.rs.bak");

        let walker = Walker::new(&config_for(&temp_dir)).unwrap();
        let names: HashSet<String> = walker
            .map(|d| d.unwrap().type_name().to_string())
            .collect();

        let expected: HashSet<String> = ["app::commands::hello", "app::commands::db::migrate"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_walk_counts_scanned_files() {
        let temp_dir = TempDir::new().unwrap();
        let commands = temp_dir.path().join("commands");
        touch(&commands, "one.rs");
        touch(&commands, "two.rs");

        let mut walker = Walker::new(&config_for(&temp_dir)).unwrap();
        assert_eq!(walker.scanned(), 0);
        while walker.next().is_some() {}
        assert_eq!(walker.scanned(), 2);
    }

    #[test]
    fn test_walker_fails_before_walking() {
        let config = DiscoveryConfig::new("test-app").with_namespace("app::commands");
        let result = Walker::new(&config);

        match result {
            Err(ConsoleError::Config(err)) => {
                assert_eq!(err.to_string(), "COMMANDS_DIRECTORY is not defined in test-app")
            }
            _ => panic!("expected a configuration error"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_follow_symlink_loops() {
        let temp_dir = TempDir::new().unwrap();
        let commands = temp_dir.path().join("commands");
        touch(&commands, "db/migrate.rs");
        std::os::unix::fs::symlink(&commands, commands.join("db/loop")).unwrap();

        let walker = Walker::new(&config_for(&temp_dir)).unwrap();
        let found: Vec<_> = walker.collect::<Result<Vec<_>>>().unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_source_path_for_nested_type() {
        let path = source_path_for(
            "app::commands::db::run_migrations",
            Path::new("/srv/commands"),
            "app::commands",
            "rs",
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("/srv/commands/db/run_migrations.rs"));
    }

    #[test]
    fn test_source_path_for_outside_namespace() {
        let result = source_path_for(
            "other::commands::run",
            Path::new("/srv/commands"),
            "app::commands",
            "rs",
        );
        assert!(matches!(result, Err(DerivationError::OutsideNamespace { .. })));

        let result = source_path_for("app::commandsx::run", Path::new("/srv"), "app::commands", "rs");
        assert!(matches!(result, Err(DerivationError::OutsideNamespace { .. })));
    }

    #[test]
    fn test_source_path_reverses_type_name() {
        let root = Path::new("/srv/commands");
        let path = source_path_for("app::commands::db::migrate", root, "app::commands", "rs").unwrap();
        assert_eq!(
            type_name_for(&path, root, "app::commands").unwrap(),
            "app::commands::db::migrate"
        );
    }

    #[test]
    fn test_descriptor_for_checks_config() {
        let config = DiscoveryConfig::new("test-app").with_directory("commands");
        let result = descriptor_for(&config, "app::commands::hello");
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }
}
