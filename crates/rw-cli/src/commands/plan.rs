//! Plan command implementation - dry-run visibility into the bootstrap.
//!
//! Resolves config, environment, and the launch plan exactly the way `up`
//! does, then prints the command sequence without executing anything.

use anyhow::{Context, Result};
use rw_core::build_plan;

use crate::cli::{GlobalArgs, PlanArgs, PlanOutput};
use crate::commands::common::{build_launch_context, print_table};

/// Execute the plan command
pub(crate) async fn execute(args: &PlanArgs, global: &GlobalArgs) -> Result<()> {
    let ctx = build_launch_context(global)?;

    let mut config = ctx.config.clone();
    if args.with_migrate {
        config.migration.skip = false;
    }
    let plan = build_plan(&config, ctx.mode, &ctx.env, false);

    match args.output {
        PlanOutput::Json => {
            let json = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            println!("{json}");
        }
        PlanOutput::Table => {
            println!("Launch plan for '{}' ({})\n", config.name, plan.mode);

            let mut rows: Vec<Vec<String>> = Vec::new();
            match &plan.migrate {
                Some(migrate) => {
                    rows.push(vec!["migrate".to_string(), migrate.display_line()]);
                }
                None => {
                    rows.push(vec!["migrate".to_string(), "(skipped)".to_string()]);
                }
            }
            rows.push(vec!["serve".to_string(), plan.server.display_line()]);
            print_table(&["STEP", "COMMAND"], &rows);

            println!();
            println!(
                "Handoff: {}",
                match plan.handoff {
                    rw_core::Handoff::Wait => "wait (foreground, launcher stays parent)",
                    rw_core::Handoff::Exec => "exec (replace launcher process image)",
                }
            );
            println!(
                "Exports: {}={}, {}={}",
                config.var_names.entry_var, config.entrypoint, config.var_names.mode_var, plan.mode
            );
        }
    }

    Ok(())
}
