//! Configuration validation
//!
//! Discovery refuses to start on a broken configuration, and a project can be
//! checked ahead of time with [`check_env_file`].

use crate::config::parse::{read_env_file, ENV_FILE_NAME};
use crate::config::types::{DiscoveryConfig, COMMANDS_DIRECTORY_VAR, COMMANDS_NAMESPACE_VAR};
use crate::discovery::NAMESPACE_SEPARATOR;
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::path::Path;

/// Validate a discovery configuration
///
/// Both required values must be present and non-blank. The namespace must be
/// made of identifier segments.
pub fn validate_config(config: &DiscoveryConfig) -> ConfigResult<()> {
    require(
        COMMANDS_DIRECTORY_VAR,
        config.commands_directory.as_deref(),
        &config.application,
    )?;
    require(
        COMMANDS_NAMESPACE_VAR,
        config.namespace(),
        &config.application,
    )?;

    if let Some(namespace) = config.namespace() {
        validate_namespace(namespace)?;
    }

    if config.extension.is_empty() {
        return Err(ConfigError::Invalid(
            "Command file extension cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn require(field: &str, value: Option<&str>, application: &str) -> ConfigResult<()> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(ConfigError::NotDefined {
            field: field.to_string(),
            application: application.to_string(),
        }),
    }
}

/// Validate the segments of a namespace
fn validate_namespace(namespace: &str) -> ConfigResult<()> {
    for segment in namespace.split(NAMESPACE_SEPARATOR) {
        if !is_identifier(segment) {
            return Err(ConfigError::Invalid(format!(
                "{} '{}' has an invalid segment '{}'",
                COMMANDS_NAMESPACE_VAR, namespace, segment
            )));
        }
    }
    Ok(())
}

/// Check whether a string can be used as a type path segment
pub fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Report the discovery variables missing from a project's `.env` file
///
/// Returns one message per missing variable, or nothing when the file
/// defines both. A missing file counts as defining nothing.
pub fn check_env_file(root: &Path) -> ConfigResult<Vec<String>> {
    let env_path = root.join(ENV_FILE_NAME);
    let vars = if env_path.is_file() {
        read_env_file(&env_path)?
    } else {
        HashMap::new()
    };

    let location = env_path.display().to_string();
    Ok([COMMANDS_DIRECTORY_VAR, COMMANDS_NAMESPACE_VAR]
        .iter()
        .filter(|key| !vars.contains_key(**key))
        .map(|key| {
            ConfigError::NotDefined {
                field: key.to_string(),
                application: location.clone(),
            }
            .to_string()
        })
        .collect())
}
