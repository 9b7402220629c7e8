//! Configuration types and parsing for runway.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Main project configuration from runway.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Application entry-point file handed to the framework
    #[serde(default = "default_entrypoint")]
    pub entrypoint: String,

    /// Launch mode (development or production)
    #[serde(default)]
    pub mode: Mode,

    /// Virtual environment directory, relative to the project root.
    ///
    /// When set, commands resolve from `<venv>/bin` instead of the
    /// system-wide installation. When unset, the inherited PATH is used.
    #[serde(default)]
    pub venv: Option<String>,

    /// Dotenv file loaded into the child environment (missing file is fine)
    #[serde(default = "default_env_file")]
    pub env_file: String,

    /// Extra variables exported to every launched command
    #[serde(default)]
    pub env_vars: HashMap<String, String>,

    /// Names of the two framework variables Runway exports
    #[serde(default)]
    pub var_names: EnvVarNames,

    /// Schema migration step configuration
    #[serde(default)]
    pub migration: MigrationConfig,

    /// Server handoff configuration
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_entrypoint() -> String {
    "app.py".to_string()
}

fn default_env_file() -> String {
    ".env".to_string()
}

/// Launch mode selecting the development or production profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Single-process auto-reloading development server
    #[default]
    Development,
    /// Multi-worker production process manager
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

/// Names of the environment variables the downstream framework reads.
///
/// Defaults match Flask (`FLASK_APP` / `FLASK_ENV`); projects targeting a
/// different framework override these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvVarNames {
    /// Variable naming the application entry point
    #[serde(default = "default_entry_var")]
    pub entry_var: String,

    /// Variable carrying the mode flag
    #[serde(default = "default_mode_var")]
    pub mode_var: String,
}

impl Default for EnvVarNames {
    fn default() -> Self {
        EnvVarNames {
            entry_var: default_entry_var(),
            mode_var: default_mode_var(),
        }
    }
}

fn default_entry_var() -> String {
    "FLASK_APP".to_string()
}

fn default_mode_var() -> String {
    "FLASK_ENV".to_string()
}

/// Schema migration step configuration.
///
/// The migration tool owns migration history and storage; Runway only
/// invokes it and propagates its exit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MigrationConfig {
    /// Migration tool executable
    #[serde(default = "default_migration_program")]
    pub program: String,

    /// Arguments for the upgrade action
    #[serde(default = "default_migration_args")]
    pub args: Vec<String>,

    /// Skip the migration step entirely
    #[serde(default)]
    pub skip: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        MigrationConfig {
            program: default_migration_program(),
            args: default_migration_args(),
            skip: false,
        }
    }
}

fn default_migration_program() -> String {
    "flask".to_string()
}

fn default_migration_args() -> Vec<String> {
    vec!["db".to_string(), "upgrade".to_string()]
}

/// Server handoff configuration for both launch modes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Development server executable
    #[serde(default = "default_dev_program")]
    pub dev_program: String,

    /// Development server arguments
    #[serde(default = "default_dev_args")]
    pub dev_args: Vec<String>,

    /// Production process manager executable
    #[serde(default = "default_prod_program")]
    pub prod_program: String,

    /// WSGI application module passed to the process manager
    #[serde(default = "default_app_module")]
    pub app_module: String,

    /// Production worker count
    #[serde(default = "default_workers")]
    pub workers: u32,

    /// Per-request timeout in seconds, passed opaquely to the process manager
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,

    /// Bind address (host:port). When unset, the server's own default applies.
    #[serde(default)]
    pub bind: Option<String>,

    /// Handoff semantics override. When unset, development waits on the
    /// server in the foreground and production replaces the launcher process.
    #[serde(default)]
    pub handoff: Option<Handoff>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            dev_program: default_dev_program(),
            dev_args: default_dev_args(),
            prod_program: default_prod_program(),
            app_module: default_app_module(),
            workers: default_workers(),
            timeout_secs: default_timeout_secs(),
            bind: None,
            handoff: None,
        }
    }
}

fn default_dev_program() -> String {
    "flask".to_string()
}

fn default_dev_args() -> Vec<String> {
    vec!["run".to_string()]
}

fn default_prod_program() -> String {
    "gunicorn".to_string()
}

fn default_app_module() -> String {
    "app:app".to_string()
}

fn default_workers() -> u32 {
    3
}

fn default_timeout_secs() -> u32 {
    120
}

/// Server handoff semantics.
///
/// `Wait` spawns the server and waits for it, so the launcher stays the
/// parent and the server's exit status becomes the launcher's. `Exec`
/// replaces the launcher's process image, so the server inherits the pid
/// and reaps its own children; control never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handoff {
    /// Spawn the server and wait for it in the foreground
    Wait,
    /// Replace the launcher's process image with the server
    Exec,
}

impl fmt::Display for Handoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handoff::Wait => write!(f, "wait"),
            Handoff::Exec => write!(f, "exec"),
        }
    }
}

impl Config {
    /// Load configuration from a project directory.
    ///
    /// Reads `runway.yml` from `project_dir` unless `config_path` overrides
    /// the location. The project directory must exist.
    pub fn load(project_dir: &Path, config_path: Option<&Path>) -> CoreResult<Config> {
        if !project_dir.is_dir() {
            return Err(CoreError::ProjectNotFound {
                path: project_dir.display().to_string(),
            });
        }

        let path: PathBuf = match config_path {
            Some(p) => p.to_path_buf(),
            None => project_dir.join("runway.yml"),
        };

        if !path.is_file() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config =
            serde_yaml::from_str(&contents).map_err(|e| CoreError::ConfigParseError {
                message: format!("{}: {}", path.display(), e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values after parsing
    pub fn validate(&self) -> CoreResult<()> {
        if self.name.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "project name must not be empty".to_string(),
            });
        }
        if self.entrypoint.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "entrypoint must not be empty".to_string(),
            });
        }
        if self.migration.program.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "migration.program must not be empty".to_string(),
            });
        }
        if self.server.dev_program.trim().is_empty() || self.server.prod_program.trim().is_empty()
        {
            return Err(CoreError::ConfigInvalid {
                message: "server programs must not be empty".to_string(),
            });
        }
        if self.server.workers == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "server.workers must be at least 1".to_string(),
            });
        }
        if self.server.timeout_secs == 0 {
            return Err(CoreError::ConfigInvalid {
                message: "server.timeout_secs must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// The effective launch mode, honoring a CLI override
    pub fn resolve_mode(&self, override_mode: Option<Mode>) -> Mode {
        override_mode.unwrap_or(self.mode)
    }

    /// The effective handoff semantics for the given mode.
    ///
    /// Explicit `server.handoff` wins; otherwise development waits and
    /// production execs.
    pub fn resolve_handoff(&self, mode: Mode) -> Handoff {
        self.server.handoff.unwrap_or(match mode {
            Mode::Development => Handoff::Wait,
            Mode::Production => Handoff::Exec,
        })
    }

    /// Absolute path of the configured venv directory, if any
    pub fn venv_absolute(&self, project_root: &Path) -> Option<PathBuf> {
        self.venv.as_ref().map(|v| project_root.join(v))
    }

    /// Absolute path of the dotenv file
    pub fn env_file_absolute(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.env_file)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
