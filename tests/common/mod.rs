//! Common test utilities

#![allow(dead_code)]

use rconsole::config::DiscoveryConfig;
use rconsole::error::{BuildError, CommandResult};
use rconsole::registry::Catalog;
use rconsole::{Command, Context};
use std::cell::Cell;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

pub const NAMESPACE: &str = "fixtures::commands";

/// Command files of the fixture tree, relative to the commands directory
pub const FIXTURE_FILES: &[&str] = &[
    "test_command.rs",
    "namespaced/namespaced_test_command.rs",
    "namespaced/sub_namespaced/sub_namespaced_test_command.rs",
    "bad_command/bad_test_command.rs",
    "abstract_command.rs",
    "support.rs",
    "unlisted.rs",
    "README.md",
    ".scratch/ignored.rs",
];

/// A command that reports itself and then runs its siblings
pub struct FixtureCommand {
    name: String,
    about: &'static str,
    siblings: Vec<&'static str>,
}

impl FixtureCommand {
    pub fn boxed(name: &str, about: &'static str, siblings: &[&'static str]) -> Box<dyn Command> {
        Box::new(FixtureCommand {
            name: name.to_string(),
            about,
            siblings: siblings.to_vec(),
        })
    }
}

impl Command for FixtureCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn about(&self) -> Option<&str> {
        Some(self.about)
    }

    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult<i32> {
        ctx.output().writeln(&format!("{} ran", self.name));
        for sibling in &self.siblings {
            ctx.call(sibling, &[])?;
        }
        Ok(0)
    }
}

/// Create a temporary project holding the fixture commands directory
pub fn create_fixture_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let commands = temp_dir.path().join("commands");
    for file in FIXTURE_FILES {
        touch(&commands, file);
    }
    temp_dir
}

/// Create an empty file, along with its parent directories
pub fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "").unwrap();
}

/// Configuration pointing at a fixture tree
pub fn fixture_config(temp_dir: &TempDir) -> DiscoveryConfig {
    DiscoveryConfig::new("fixture-app")
        .with_root(temp_dir.path())
        .with_directory("/commands/")
        .with_namespace(NAMESPACE)
}

/// Catalog for the fixture tree, counting every factory call
pub fn fixture_catalog(builds: Rc<Cell<usize>>) -> Catalog {
    let counted = move |builds: &Rc<Cell<usize>>| builds.set(builds.get() + 1);

    let b1 = builds.clone();
    let b2 = builds.clone();
    let b3 = builds.clone();
    let b4 = builds;

    Catalog::new()
        .command("fixtures::commands::test_command", move |name| {
            counted(&b1);
            Ok(FixtureCommand::boxed(name, "Test Command", &[]))
        })
        .command(
            "fixtures::commands::namespaced::namespaced_test_command",
            move |name| {
                counted(&b2);
                Ok(FixtureCommand::boxed(name, "Namespaced Test Command", &["test-command"]))
            },
        )
        .command(
            "fixtures::commands::namespaced::sub_namespaced::sub_namespaced_test_command",
            move |name| {
                counted(&b3);
                Ok(FixtureCommand::boxed(
                    name,
                    "Sub Namespaced Test Command",
                    &["test-command", "namespaced:namespaced-test-command"],
                ))
            },
        )
        .command(
            "fixtures::commands::bad_command::bad_test_command",
            move |_| {
                counted(&b4);
                Err(BuildError::MissingDependency("UnavailableDependency".to_string()))
            },
        )
        .abstract_type("fixtures::commands::abstract_command")
        .helper("fixtures::commands::support")
}
