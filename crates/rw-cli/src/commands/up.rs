//! Up command implementation - the full bootstrap sequence

use anyhow::Result;
use rw_core::{execute_plan, SystemRunner};

use crate::cli::{GlobalArgs, UpArgs};
use crate::commands::common::{build_context_plan, build_launch_context, map_step_error, ExitCode};

/// Execute the up command: assemble the environment, run migrations,
/// then hand control to the server
pub(crate) async fn execute(args: &UpArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = build_launch_context(global)?;
    let plan = build_context_plan(&ctx, args.no_migrate);

    if global.verbose {
        if let Some(migrate) = &plan.migrate {
            eprintln!("[verbose] Migration: {}", migrate.display_line());
        }
        eprintln!(
            "[verbose] Server: {} ({} handoff)",
            plan.server.display_line(),
            plan.handoff
        );
    }

    let runner = SystemRunner;
    match execute_plan(&runner, &plan).await {
        // Wait handoff: the server ran in the foreground and exited.
        // Its status is ours.
        Ok(0) => Ok(()),
        Ok(status) => Err(ExitCode(status).into()),
        Err(err) => Err(map_step_error(err)),
    }
}
