//! Launch-plan construction.
//!
//! A `LaunchPlan` is the fully resolved command sequence for one bootstrap:
//! an optional migration step followed by exactly one server handoff.
//! Building a plan performs no I/O and spawns nothing, so the `plan`
//! subcommand can show exactly what `up` would execute.

use crate::config::{Config, Handoff, Mode};
use serde::Serialize;
use std::collections::HashMap;

/// One external command invocation: program, arguments, and the complete
/// child environment.
///
/// The environment map is excluded from serialized output so that `plan
/// --output json` never prints secrets pulled from `.env`.
#[derive(Debug, Clone, Serialize)]
pub struct CommandSpec {
    /// Executable name, resolved against the assembled PATH
    pub program: String,

    /// Arguments in invocation order
    pub args: Vec<String>,

    /// Full child environment for this invocation
    #[serde(skip_serializing)]
    pub env: HashMap<String, String>,
}

impl CommandSpec {
    /// Human-readable command line for logs and the `plan` table
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// The resolved bootstrap sequence for one launch
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    /// Mode the plan was built for
    pub mode: Mode,

    /// Migration step; `None` when migrations are skipped
    pub migrate: Option<CommandSpec>,

    /// Server command the launcher hands control to
    pub server: CommandSpec,

    /// How control is handed to the server
    pub handoff: Handoff,
}

/// Build the launch plan for the given mode and assembled environment.
///
/// Every spec in the plan carries the same environment map, so the
/// migration tool and the server observe identical configuration.
pub fn build_plan(
    config: &Config,
    mode: Mode,
    env: &HashMap<String, String>,
    skip_migrate: bool,
) -> LaunchPlan {
    let migrate = if skip_migrate || config.migration.skip {
        None
    } else {
        Some(CommandSpec {
            program: config.migration.program.clone(),
            args: config.migration.args.clone(),
            env: env.clone(),
        })
    };

    let server = match mode {
        Mode::Development => dev_server_spec(config, env),
        Mode::Production => prod_server_spec(config, env),
    };

    LaunchPlan {
        mode,
        migrate,
        server,
        handoff: config.resolve_handoff(mode),
    }
}

/// Foreground development server: the configured command as-is, with the
/// bind address translated to `--host`/`--port`. Never carries any
/// process-manager arguments.
fn dev_server_spec(config: &Config, env: &HashMap<String, String>) -> CommandSpec {
    let mut args = config.server.dev_args.clone();
    if let Some(bind) = &config.server.bind {
        let (host, port) = split_bind(bind);
        args.push("--host".to_string());
        args.push(host.to_string());
        if let Some(port) = port {
            args.push("--port".to_string());
            args.push(port.to_string());
        }
    }
    CommandSpec {
        program: config.server.dev_program.clone(),
        args,
        env: env.clone(),
    }
}

/// Multi-worker process manager: worker count and request timeout are
/// always passed explicitly, the app module comes last.
fn prod_server_spec(config: &Config, env: &HashMap<String, String>) -> CommandSpec {
    let mut args = vec![
        "--workers".to_string(),
        config.server.workers.to_string(),
        "--timeout".to_string(),
        config.server.timeout_secs.to_string(),
    ];
    if let Some(bind) = &config.server.bind {
        args.push("--bind".to_string());
        args.push(bind.clone());
    }
    args.push(config.server.app_module.clone());
    CommandSpec {
        program: config.server.prod_program.clone(),
        args,
        env: env.clone(),
    }
}

/// Split a `host:port` bind address; a bare value is treated as a host
fn split_bind(bind: &str) -> (&str, Option<&str>) {
    match bind.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() => (host, Some(port)),
        _ => (bind, None),
    }
}

#[cfg(test)]
#[path = "plan_test.rs"]
mod tests;
