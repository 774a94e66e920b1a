//! Error types for rconsole

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for rconsole operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Main error type for rconsole
///
/// Only configuration and derivation problems surface here. A command that
/// fails to build is reported as a [`crate::registry::LoadFailure`] value and
/// never aborts discovery.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration-related errors, shown as-is
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A discovered file could not be mapped to a type path
    #[error("Derivation error: {0}")]
    Derivation(#[from] DerivationError),

    /// Command execution errors
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// Directory walking errors
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Discovery configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} is not defined in {application}")]
    NotDefined { field: String, application: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to read env file '{path}': {error}")]
    EnvFile { path: PathBuf, error: String },
}

/// Errors mapping a discovered file to a type path
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DerivationError {
    #[error("'{path}' is not inside the commands directory '{root}'")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("'{0}' is not valid UTF-8")]
    NonUtf8(PathBuf),

    #[error("'{type_name}' is not inside the namespace '{namespace}'")]
    OutsideNamespace { type_name: String, namespace: String },

    #[error("'{path}' has no usable segment '{segment}'")]
    InvalidSegment { path: PathBuf, segment: String },
}

/// Raised by a command factory when a command cannot be constructed
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Unresolvable dependency '{0}'")]
    MissingDependency(String),

    #[error("{0}")]
    Failed(String),
}

/// Errors raised while a command runs
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command '{0}' is not defined")]
    NotFound(String),

    #[error("Invalid arguments for '{name}': {error}")]
    InvalidArguments { name: String, error: String },

    #[error("{0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Specialized result type for derivation operations
pub type DerivationResult<T> = std::result::Result<T, DerivationError>;

/// Specialized result type for command execution
pub type CommandResult<T> = std::result::Result<T, CommandError>;
