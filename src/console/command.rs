//! The command capability set
//!
//! Every command an application registers implements [`Command`]. Commands
//! run with a [`Context`] holding the shared input and output handles and a
//! read-only view of the registry, so a command can run a sibling.

use crate::console::io::{Input, Output, Verbosity};
use crate::error::{CommandError, CommandResult};
use crate::registry::Registry;

/// A named, executable command
pub trait Command {
    /// Name the command is invoked by
    fn name(&self) -> &str;

    /// Replace the command name
    fn set_name(&mut self, name: String);

    /// One-line description for help output
    fn about(&self) -> Option<&str> {
        None
    }

    /// Add arguments and options to the command's parser
    fn configure(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Run the command, returning its exit code
    fn execute(&self, ctx: &mut Context<'_>) -> CommandResult<i32>;
}

/// Build the argument parser for a command
pub fn cli_command(command: &dyn Command) -> clap::Command {
    let mut cmd = clap::Command::new(command.name().to_string());
    if let Some(about) = command.about() {
        cmd = cmd.about(about.to_string());
    }
    command.configure(cmd)
}

/// Execution context handed to a running command
pub struct Context<'a> {
    input: Input,
    output: &'a mut dyn Output,
    registry: &'a Registry,
}

impl<'a> Context<'a> {
    pub fn new(input: Input, output: &'a mut dyn Output, registry: &'a Registry) -> Self {
        Context {
            input,
            output,
            registry,
        }
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn output(&mut self) -> &mut dyn Output {
        &mut *self.output
    }

    pub fn registry(&self) -> &Registry {
        self.registry
    }

    pub fn verbosity(&self) -> Verbosity {
        self.output.verbosity()
    }

    /// Run a sibling command synchronously with its own arguments
    ///
    /// The sibling shares this context's output and registry.
    pub fn call(&mut self, name: &str, args: &[&str]) -> CommandResult<i32> {
        let registry = self.registry;
        let command = registry
            .get(name)
            .ok_or_else(|| CommandError::NotFound(name.to_string()))?;

        let argv: Vec<String> = std::iter::once(name)
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        let matches = cli_command(command)
            .try_get_matches_from(&argv)
            .map_err(|e| CommandError::InvalidArguments {
                name: name.to_string(),
                error: e.to_string(),
            })?;

        tracing::debug!("calling {} {:?}", name, args);
        let mut nested = Context::new(Input::new(argv, matches), &mut *self.output, registry);
        command.execute(&mut nested)
    }
}
