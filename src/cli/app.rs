//! Console application shell

use crate::config::DiscoveryConfig;
use crate::console::{cli_command, Command, ConsoleOutput, Context, Input, Output, Style, Verbosity};
use crate::discovery::descriptor_for;
use crate::error::{CommandError, Result};
use crate::registry::{
    discover, is_reserved, report_failure, Catalog, DiscoveryReport, LoadOutcome, Loader, Registry,
};
use clap::error::ErrorKind;
use clap::{value_parser, Arg, ArgAction};
use clap_complete::Shell;

/// Name of the built-in completion subcommand
pub const COMPLETIONS: &str = "completions";

/// A console application and the commands registered with it
///
/// Commands come from two places: explicit registration with
/// [`Application::add_command`], and discovery over a commands directory
/// when a configuration is set.
pub struct Application {
    name: String,
    version: String,
    about: Option<String>,
    config: Option<DiscoveryConfig>,
    catalog: Catalog,
    registry: Registry,
    report: Option<DiscoveryReport>,
}

impl Application {
    /// Create an application without commands
    pub fn new(name: impl Into<String>) -> Self {
        Application {
            name: name.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            about: None,
            config: None,
            catalog: Catalog::new(),
            registry: Registry::new(),
            report: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Discover commands with this configuration
    pub fn with_config(mut self, config: DiscoveryConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build discovered commands from this catalog
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Register a command, replacing any command of the same name
    pub fn add_command(&mut self, command: Box<dyn Command>) -> &mut Self {
        self.registry.replace(command);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Discover and register the commands of the configured directory
    ///
    /// Load failures are written to `output` as they are found. Without a
    /// configuration only explicitly added commands are available. Discovery
    /// runs once; later calls return the first report and write nothing.
    pub fn load(&mut self, output: &mut dyn Output) -> Result<DiscoveryReport> {
        if let Some(report) = &self.report {
            return Ok(report.clone());
        }

        let report = match &self.config {
            Some(config) => discover(config, &self.catalog, &mut self.registry, output)?,
            None => DiscoveryReport::default(),
        };
        self.report = Some(report.clone());
        Ok(report)
    }

    /// Build the command for one type path
    ///
    /// The type path is mapped back to its command file and loaded the same
    /// way discovery loads it: same name derivation, and a failure is written
    /// to `output` as a diagnostic block. The command is not registered.
    pub fn command_from_type(
        &self,
        type_name: &str,
        output: &mut dyn Output,
    ) -> Result<LoadOutcome> {
        let config = self
            .config
            .clone()
            .unwrap_or_else(|| DiscoveryConfig::new(self.name.clone()));
        let descriptor = descriptor_for(&config, type_name)?;

        let loader = Loader::new(&self.catalog, config.namespace().unwrap_or_default());
        let outcome = loader.try_load(&descriptor);
        if let LoadOutcome::Failed(failure) = &outcome {
            report_failure(output, failure);
        }
        Ok(outcome)
    }

    /// Build the clap command for the registered commands
    pub fn build_cli(&self) -> clap::Command {
        let mut cmd = clap::Command::new(self.name.clone())
            .version(self.version.clone())
            .about(self.about.clone().unwrap_or_else(|| {
                format!("Console application {}", self.name)
            }))
            .arg(
                Arg::new("quiet")
                    .short('q')
                    .long("quiet")
                    .help("Only print errors")
                    .action(ArgAction::SetTrue)
                    .global(true),
            )
            .arg(
                Arg::new("silent")
                    .short('s')
                    .long("silent")
                    .help("Print no output")
                    .action(ArgAction::SetTrue)
                    .global(true),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .help("Print verbose output")
                    .action(ArgAction::SetTrue)
                    .global(true),
            );

        if !self.registry.contains(COMPLETIONS) {
            cmd = cmd.subcommand(
                clap::Command::new(COMPLETIONS)
                    .about("Generate shell completions")
                    .arg(
                        Arg::new("shell")
                            .value_name("SHELL")
                            .required(true)
                            .value_parser(value_parser!(Shell)),
                    ),
            );
        }

        for command in self.registry.iter() {
            if is_reserved(command.name()) {
                tracing::warn!("ignoring command with reserved name '{}'", command.name());
                continue;
            }
            cmd = cmd.subcommand(cli_command(command));
        }

        cmd
    }

    /// Run the application with the given arguments
    ///
    /// The first argument is the binary name. Commands are loaded first if
    /// [`Application::load`] has not been called yet.
    pub fn run_from<I, T>(&mut self, args: I, output: &mut dyn Output) -> Result<i32>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        output.set_verbosity(extract_verbosity(&args));

        self.load(output)?;

        let mut cli = self.build_cli();
        let matches = match cli.clone().try_get_matches_from(&args) {
            Ok(matches) => matches,
            Err(e) => {
                let style = match e.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Style::Plain,
                    _ => Style::Error,
                };
                for line in e.render().to_string().lines() {
                    output.write_styled(line, style);
                }
                return Ok(e.exit_code());
            }
        };

        let (name, sub_matches) = match matches.subcommand() {
            Some(sub) => sub,
            None => {
                for line in cli.render_help().to_string().lines() {
                    output.writeln(line);
                }
                return Ok(0);
            }
        };

        if name == COMPLETIONS && !self.registry.contains(COMPLETIONS) {
            if let Some(shell) = sub_matches.get_one::<Shell>("shell").copied() {
                let mut buffer = Vec::new();
                clap_complete::generate(shell, &mut cli, self.name.clone(), &mut buffer);
                for line in String::from_utf8_lossy(&buffer).lines() {
                    output.writeln(line);
                }
            }
            return Ok(0);
        }

        let command = self
            .registry
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;

        let command_args = args
            .iter()
            .position(|a| a == name)
            .map(|i| args[i..].to_vec())
            .unwrap_or_else(|| vec![name.to_string()]);

        tracing::debug!("running {}", name);
        let mut ctx = Context::new(
            Input::new(command_args, sub_matches.clone()),
            output,
            &self.registry,
        );
        Ok(command.execute(&mut ctx)?)
    }

    /// Run the application with the process arguments on the terminal
    pub fn run(mut self) -> Result<i32> {
        let mut output = ConsoleOutput::new();
        self.run_from(std::env::args(), &mut output)
    }
}

/// Read the verbosity flags before the full command line is parsed
///
/// Load failures are reported before parsing, so they need the verbosity
/// early.
pub fn extract_verbosity(args: &[String]) -> Verbosity {
    let has = |short: &str, long: &str| args.iter().any(|a| a == short || a == long);

    if has("-s", "--silent") {
        Verbosity::Silent
    } else if has("-q", "--quiet") {
        Verbosity::Quiet
    } else if has("-v", "--verbose") {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    }
}
