//! Commands shipped with the `rconsole` binary

use crate::config::{check_env_file, load_config};
use crate::console::{Command, Context, Style};
use crate::discovery::{derive_name, prefix_depth, Walker};
use crate::error::{CommandError, CommandResult};
use clap::{Arg, ArgAction};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Reports the discovery variables missing from a project's `.env` file
pub struct CheckConfigCommand {
    name: String,
}

impl CheckConfigCommand {
    pub fn new(name: impl Into<String>) -> Self {
        CheckConfigCommand { name: name.into() }
    }
}

impl Command for CheckConfigCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn about(&self) -> Option<&str> {
        Some("Check that a project's .env file configures command discovery")
    }

    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("dir")
                .value_name("DIR")
                .help("Project root holding the .env file")
                .default_value("."),
        )
    }

    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult<i32> {
        let root = ctx.input().get_one("dir").cloned().unwrap_or_else(|| ".".to_string());
        let messages =
            check_env_file(Path::new(&root)).map_err(|e| CommandError::Failed(e.to_string()))?;

        if messages.is_empty() {
            ctx.output()
                .write_styled("Command discovery is configured", Style::Info);
            return Ok(0);
        }

        ctx.output().block(&messages, Style::Error);
        Ok(1)
    }
}

/// A discovered command file as listed by `scan`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    pub command: String,
    pub type_name: String,
    pub source_path: PathBuf,
}

/// Lists the command files of a project and the names they derive to
///
/// This is the table a catalog has to cover: one entry per type path.
pub struct ScanCommand {
    name: String,
    application: String,
}

impl ScanCommand {
    pub fn new(name: impl Into<String>, application: impl Into<String>) -> Self {
        ScanCommand {
            name: name.into(),
            application: application.into(),
        }
    }

    /// Walk the commands directory configured for a project root
    pub fn scan(&self, root: &Path) -> CommandResult<Vec<ScanEntry>> {
        let failed = |e: crate::error::ConsoleError| CommandError::Failed(e.to_string());

        let config = load_config(&self.application, root).map_err(|e| failed(e.into()))?;
        let depth = prefix_depth(config.namespace().unwrap_or_default());

        let mut entries = Walker::new(&config)
            .map_err(failed)?
            .map(|descriptor| {
                descriptor.map(|d| ScanEntry {
                    command: derive_name(d.type_name(), depth),
                    type_name: d.type_name().to_string(),
                    source_path: d.source_path().to_path_buf(),
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()
            .map_err(failed)?;

        entries.sort_by(|a, b| a.command.cmp(&b.command));
        Ok(entries)
    }
}

impl Command for ScanCommand {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn about(&self) -> Option<&str> {
        Some("List command files and the names derived for them")
    }

    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("dir")
                .long("dir")
                .value_name("DIR")
                .help("Project root to load the configuration from")
                .default_value("."),
        )
        .arg(
            Arg::new("yaml")
                .long("yaml")
                .help("Print the entries as YAML")
                .action(ArgAction::SetTrue),
        )
    }

    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult<i32> {
        let root = ctx.input().get_one("dir").cloned().unwrap_or_else(|| ".".to_string());
        let entries = self.scan(Path::new(&root))?;

        if ctx.input().get_flag("yaml") {
            let yaml =
                serde_yaml::to_string(&entries).map_err(|e| CommandError::Failed(e.to_string()))?;
            for line in yaml.lines() {
                ctx.output().writeln(line);
            }
            return Ok(0);
        }

        let width = entries.iter().map(|e| e.command.len()).max().unwrap_or(0);
        for entry in &entries {
            ctx.output().write_styled(
                &format!("{:width$}  {}", entry.command, entry.type_name, width = width),
                Style::File,
            );
        }
        if entries.is_empty() {
            ctx.output().write_styled("No command files found", Style::Comment);
        }

        Ok(0)
    }
}
