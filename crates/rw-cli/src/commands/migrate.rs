//! Migrate command implementation - runs the schema migration step alone

use anyhow::Result;
use rw_core::{run_step, SystemRunner};

use crate::cli::GlobalArgs;
use crate::commands::common::{build_context_plan, build_launch_context, map_step_error};

/// Execute the migrate command
pub(crate) async fn execute(global: &GlobalArgs) -> Result<()> {
    let ctx = build_launch_context(global)?;
    let plan = build_context_plan(&ctx, false);

    let Some(migrate) = &plan.migrate else {
        println!("Migration step is disabled in runway.yml (migration.skip)");
        return Ok(());
    };

    if global.verbose {
        eprintln!("[verbose] Migration: {}", migrate.display_line());
    }

    let runner = SystemRunner;
    run_step(&runner, migrate, "migration")
        .await
        .map_err(map_step_error)?;

    println!("Migrations applied for '{}'", ctx.config.name);
    Ok(())
}
