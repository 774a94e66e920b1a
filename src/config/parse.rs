//! Configuration loading from the environment and `.env` files

use crate::config::types::{DiscoveryConfig, COMMANDS_DIRECTORY_VAR, COMMANDS_NAMESPACE_VAR};
use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// Name of the environment file searched for
pub const ENV_FILE_NAME: &str = ".env";

/// Find the `.env` file by searching a directory and its parents
pub fn find_env_file_from(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = Some(start_dir);

    while let Some(dir) = current_dir {
        let env_path = dir.join(ENV_FILE_NAME);
        if env_path.is_file() {
            return Some(env_path);
        }
        current_dir = dir.parent();
    }

    None
}

/// Read all variables from an env file
///
/// The process environment is left untouched.
pub fn read_env_file(path: &Path) -> ConfigResult<HashMap<String, String>> {
    let to_error = |e: dotenvy::Error| ConfigError::EnvFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    };

    dotenvy::from_path_iter(path)
        .map_err(to_error)?
        .map(|item| item.map_err(to_error))
        .collect()
}

/// Build a configuration from a variable map
pub fn config_from_vars(
    application: &str,
    root: &Path,
    vars: &HashMap<String, String>,
) -> DiscoveryConfig {
    let mut config = DiscoveryConfig::new(application).with_root(root);
    config.commands_directory = vars.get(COMMANDS_DIRECTORY_VAR).cloned();
    config.commands_namespace = vars.get(COMMANDS_NAMESPACE_VAR).cloned();
    config
}

/// Build a configuration for a project root
///
/// Values come from the nearest `.env` file at or above `root`; variables
/// already set in the process environment take precedence, the same way
/// `dotenvy` never overrides an existing variable. The root of the returned
/// configuration is the directory holding the `.env` file, or `root` when
/// none was found.
pub fn load_config(application: &str, root: &Path) -> ConfigResult<DiscoveryConfig> {
    let (mut vars, base) = match find_env_file_from(root) {
        Some(env_path) => {
            tracing::debug!("loading configuration from {}", env_path.display());
            let base = env_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            (read_env_file(&env_path)?, base)
        }
        None => (HashMap::new(), root.to_path_buf()),
    };

    for key in [COMMANDS_DIRECTORY_VAR, COMMANDS_NAMESPACE_VAR] {
        if let Ok(value) = env::var(key) {
            vars.insert(key.to_string(), value);
        }
    }

    Ok(config_from_vars(application, &base, &vars))
}
