//! Console application shell and the `rconsole` binary
//!
//! This module turns a registry into a clap command line, dispatches to the
//! selected command, and wires up the built-in commands of the binary.

pub mod app;
pub mod builtin;

// Re-export main types
pub use app::*;
pub use builtin::*;

use crate::console::{ConsoleOutput, Verbosity};
use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Run the `rconsole` binary, returning its exit code
pub fn run() -> anyhow::Result<i32> {
    let args: Vec<String> = std::env::args().collect();
    init_tracing(extract_verbosity(&args));

    let mut app = Application::new("rconsole")
        .with_version(crate::VERSION)
        .with_about("Inspect and check command discovery for console applications");
    app.add_command(Box::new(CheckConfigCommand::new("config:check")));
    app.add_command(Box::new(ScanCommand::new("scan", "rconsole")));

    let mut output = ConsoleOutput::new();
    app.run_from(args, &mut output)
        .context("rconsole could not complete")
}

/// Install the log subscriber
///
/// `RUST_LOG` wins over the verbosity flags.
fn init_tracing(verbosity: Verbosity) {
    let level = if verbosity >= Verbosity::Verbose {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
