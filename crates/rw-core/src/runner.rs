//! Launch-plan execution.
//!
//! `execute_plan` walks the bootstrap state machine: migrate first, then
//! hand control to the server. Every failure is terminal and carries the
//! failing child's exit status so the launcher can propagate it as its
//! own. Process spawning sits behind the [`ProcessRunner`] trait so the
//! sequence is testable without real subprocesses.

use crate::config::Handoff;
use crate::error::{CoreError, CoreResult};
use crate::plan::{CommandSpec, LaunchPlan};
use async_trait::async_trait;
use std::fmt;

/// Bootstrap phases, in order. Failures from any phase are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Environment assembled, nothing launched yet
    EnvReady,
    /// Migration tool exited 0 (or was skipped)
    Migrated,
    /// Control handed to the server
    Serving,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::EnvReady => write!(f, "env-ready"),
            Phase::Migrated => write!(f, "migrated"),
            Phase::Serving => write!(f, "serving"),
        }
    }
}

/// Process-execution seam.
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Spawn the command in the foreground and wait for it.
    ///
    /// Returns the child's exit status, or `None` when it was terminated
    /// by a signal.
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<Option<i32>>;

    /// Replace the current process image with the command.
    ///
    /// On success this never returns; the returned error means the
    /// replacement itself failed (e.g. the program was not found).
    fn exec(&self, spec: &CommandSpec) -> std::io::Error;
}

/// `ProcessRunner` backed by real subprocesses.
///
/// Children receive exactly the environment map carried by the spec
/// (`env_clear` first), never the launcher's ambient environment.
pub struct SystemRunner;

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn run(&self, spec: &CommandSpec) -> std::io::Result<Option<i32>> {
        let status = tokio::process::Command::new(&spec.program)
            .args(&spec.args)
            .env_clear()
            .envs(&spec.env)
            .status()
            .await?;
        Ok(status.code())
    }

    #[cfg(unix)]
    fn exec(&self, spec: &CommandSpec) -> std::io::Error {
        use std::os::unix::process::CommandExt;
        // Returns only if the exec syscall itself failed
        std::process::Command::new(&spec.program)
            .args(&spec.args)
            .env_clear()
            .envs(&spec.env)
            .exec()
    }

    #[cfg(not(unix))]
    fn exec(&self, spec: &CommandSpec) -> std::io::Error {
        // No exec(2) on this platform: spawn, wait, and exit with the
        // child's status. The process tree differs from Unix (the launcher
        // stays the parent) but the observable exit status matches.
        match std::process::Command::new(&spec.program)
            .args(&spec.args)
            .env_clear()
            .envs(&spec.env)
            .status()
        {
            Ok(status) => std::process::exit(status.code().unwrap_or(1)),
            Err(e) => e,
        }
    }
}

/// Execute a launch plan with fail-fast semantics.
///
/// Runs the migration step (if any) and aborts immediately on a non-zero
/// status; the server command is never invoked after a failed migration.
/// With `Handoff::Wait` the server runs in the foreground and its exit
/// status is returned; with `Handoff::Exec` this function only returns
/// if process replacement failed.
pub async fn execute_plan(runner: &dyn ProcessRunner, plan: &LaunchPlan) -> CoreResult<i32> {
    log::debug!("Phase {}", Phase::EnvReady);

    if let Some(migrate) = &plan.migrate {
        run_step(runner, migrate, "migration").await?;
    } else {
        log::debug!("Migration step skipped");
    }
    log::debug!("Phase {}", Phase::Migrated);

    log::debug!(
        "Phase {}: handing off to {} ({})",
        Phase::Serving,
        plan.server.display_line(),
        plan.handoff
    );
    match plan.handoff {
        Handoff::Exec => {
            let err = runner.exec(&plan.server);
            Err(CoreError::SpawnFailed {
                step: "server",
                program: plan.server.program.clone(),
                message: err.to_string(),
            })
        }
        Handoff::Wait => {
            let status = runner
                .run(&plan.server)
                .await
                .map_err(|e| CoreError::SpawnFailed {
                    step: "server",
                    program: plan.server.program.clone(),
                    message: e.to_string(),
                })?;
            match status {
                Some(code) => Ok(code),
                None => Err(CoreError::StepTerminated { step: "server" }),
            }
        }
    }
}

/// Run a single bootstrap step in the foreground, fail-fast.
///
/// Any outcome other than a clean exit 0 is an error carrying the step
/// name and, where available, the child's exit status.
pub async fn run_step(
    runner: &dyn ProcessRunner,
    spec: &CommandSpec,
    step: &'static str,
) -> CoreResult<()> {
    log::debug!("Running {step}: {}", spec.display_line());
    let status = runner.run(spec).await.map_err(|e| CoreError::SpawnFailed {
        step,
        program: spec.program.clone(),
        message: e.to_string(),
    })?;
    match status {
        Some(0) => Ok(()),
        Some(code) => Err(CoreError::StepFailed { step, status: code }),
        None => Err(CoreError::StepTerminated { step }),
    }
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
