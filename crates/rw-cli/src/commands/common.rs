//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use rw_core::environment::parent_env;
use rw_core::{build_child_env, build_plan, Config, CoreError, LaunchPlan, Mode};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Intentionally empty: ExitCode is a control-flow mechanism, not a
        // user-facing error. If anyhow's Display chain ever reaches this
        // (e.g. downcast_ref fails in main.rs), we don't want "exit code N"
        // leaking into stderr.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Everything a launch-oriented command needs, resolved once
pub(crate) struct LaunchContext {
    pub config: Config,
    pub mode: Mode,
    pub env: HashMap<String, String>,
}

/// Load configuration from the directory specified in global CLI arguments
pub(crate) fn load_config(global: &GlobalArgs) -> Result<(Config, PathBuf)> {
    let root = PathBuf::from(&global.project_dir);
    let config_path = global.config.as_ref().map(Path::new);
    let config = Config::load(&root, config_path).context("Failed to load project")?;
    Ok((config, root))
}

/// Resolve config, mode, and the child environment for a launch command.
///
/// The mode override from `--mode` wins over the file value; the
/// environment is assembled once and shared by every step.
pub(crate) fn build_launch_context(global: &GlobalArgs) -> Result<LaunchContext> {
    let (config, root) = load_config(global)?;
    let mode = config.resolve_mode(global.mode.map(Into::into));

    if global.verbose {
        eprintln!(
            "[verbose] Project '{}', mode {}, config from {}",
            config.name,
            mode,
            root.display()
        );
    }

    let env = build_child_env(&config, &root, mode, &parent_env())
        .context("Failed to assemble child environment")?;
    Ok(LaunchContext { config, mode, env })
}

/// Build the launch plan from a resolved context
pub(crate) fn build_context_plan(ctx: &LaunchContext, skip_migrate: bool) -> LaunchPlan {
    build_plan(&ctx.config, ctx.mode, &ctx.env, skip_migrate)
}

/// Calculate column widths for a table given headers and row data.
///
/// For each column, returns the maximum width across the header and all
/// row values so that data aligns when printed with left-padding.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout: a header row, a dashed separator,
/// and each data row, columns separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  "));

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  "));
    }
}

/// Map a core error from plan execution to the CLI's exit behavior.
///
/// Step failures become a bare `ExitCode` carrying the child's status (the
/// child already printed its own diagnostics); everything else surfaces as
/// a normal error message.
pub(crate) fn map_step_error(err: CoreError) -> anyhow::Error {
    match err {
        CoreError::StepFailed { .. } | CoreError::StepTerminated { .. } => {
            let status = err.exit_status();
            log::debug!("Bootstrap step failed: {err}");
            ExitCode(status).into()
        }
        other => anyhow::Error::new(other),
    }
}
