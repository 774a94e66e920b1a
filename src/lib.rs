//! rconsole - scaffolding for command-line applications
//!
//! rconsole finds the commands of an application in a commands directory,
//! names them after their type paths (`app::commands::db::RunMigrations`
//! becomes `db:run-migrations`), and registers them with a console shell.
//! A command that fails to build is reported and left out; the rest of the
//! application keeps working.

// Public modules
pub mod cli;
pub mod config;
pub mod console;
pub mod discovery;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use cli::Application;
pub use console::{Command, Context};
pub use error::{ConsoleError, Result};

/// Current version of rconsole
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
