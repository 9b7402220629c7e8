//! Child-process environment assembly.
//!
//! Runway never launches a command against ambient process state: the full
//! child environment is assembled here as an explicit map, built from the
//! parent environment plus venv activation, the project's dotenv file, and
//! the framework variables from config. The same map is handed to every
//! downstream command, so the migration tool and the server see identical
//! configuration.

use crate::config::{Config, Mode};
use crate::error::{CoreError, CoreResult};
use std::collections::HashMap;
use std::path::Path;

/// Platform PATH entry separator
const PATH_SEPARATOR: char = if cfg!(windows) { ';' } else { ':' };

/// Capture the parent process environment as a map
pub fn parent_env() -> HashMap<String, String> {
    std::env::vars().collect()
}

/// Assemble the complete environment for downstream commands.
///
/// Layering, lowest precedence first:
/// 1. the parent environment,
/// 2. dotenv values (never overriding variables already present, matching
///    the framework's own dotenv semantics),
/// 3. venv activation variables,
/// 4. the entry-point and mode variables plus `env_vars` from config.
pub fn build_child_env(
    config: &Config,
    project_root: &Path,
    mode: Mode,
    parent: &HashMap<String, String>,
) -> CoreResult<HashMap<String, String>> {
    let mut env = parent.clone();

    apply_env_file(&mut env, &config.env_file_absolute(project_root))?;

    if let Some(venv) = config.venv_absolute(project_root) {
        activate_venv(&mut env, &venv)?;
    }

    env.insert(
        config.var_names.entry_var.clone(),
        config.entrypoint.clone(),
    );
    env.insert(config.var_names.mode_var.clone(), mode.to_string());

    for (key, value) in &config.env_vars {
        env.insert(key.clone(), value.clone());
    }

    Ok(env)
}

/// Merge a dotenv file into the environment without overriding existing keys.
///
/// A missing file is not an error; a present-but-unreadable one is.
fn apply_env_file(env: &mut HashMap<String, String>, path: &Path) -> CoreResult<()> {
    if !path.is_file() {
        log::debug!("No env file at {}, skipping", path.display());
        return Ok(());
    }

    for item in dotenvy::from_path_iter(path).map_err(|e| CoreError::EnvFileError {
        path: path.display().to_string(),
        message: e.to_string(),
    })? {
        let (key, value) = item.map_err(|e| CoreError::EnvFileError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        env.entry(key).or_insert(value);
    }
    Ok(())
}

/// Activate an isolated runtime environment.
///
/// Mirrors what a venv activation script does: export `VIRTUAL_ENV`,
/// prepend the venv's binary directory to `PATH` so subsequent commands
/// resolve from the isolated installation, and drop `PYTHONHOME`.
fn activate_venv(env: &mut HashMap<String, String>, venv: &Path) -> CoreResult<()> {
    if !venv.is_dir() {
        return Err(CoreError::VenvNotFound {
            path: venv.display().to_string(),
        });
    }

    let bin_dir = venv.join(if cfg!(windows) { "Scripts" } else { "bin" });
    let bin = bin_dir.display().to_string();

    let path = match env.get("PATH") {
        Some(existing) if !existing.is_empty() => {
            format!("{bin}{PATH_SEPARATOR}{existing}")
        }
        _ => bin,
    };
    env.insert("PATH".to_string(), path);
    env.insert("VIRTUAL_ENV".to_string(), venv.display().to_string());
    env.remove("PYTHONHOME");

    log::debug!("Activated venv at {}", venv.display());
    Ok(())
}

#[cfg(test)]
#[path = "environment_test.rs"]
mod tests;
