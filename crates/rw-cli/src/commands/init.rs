//! Init command implementation - scaffolds a new Runway project

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::cli::InitArgs;

/// Execute the init command
pub(crate) async fn execute(args: &InitArgs) -> Result<()> {
    // Reject names that could cause path traversal or confusing directory names
    if args.name.contains('/')
        || args.name.contains('\\')
        || args.name.contains("..")
        || args.name.starts_with('.')
        || args.name.starts_with('-')
    {
        anyhow::bail!(
            "Invalid project name '{}': must not contain '/', '\\', '..', or start with '.' or '-'",
            args.name
        );
    }

    let project_dir = Path::new(&args.name);

    if project_dir.exists() {
        anyhow::bail!(
            "Directory '{}' already exists. Choose a different project name.",
            args.name
        );
    }

    println!("Creating new Runway project: {}\n", args.name);

    fs::create_dir_all(project_dir)
        .with_context(|| format!("Failed to create directory: {}", project_dir.display()))?;

    // Generate runway.yml
    // Escape YAML special characters in interpolated values
    let safe_name = args.name.replace('"', "\\\"");
    let safe_entrypoint = args.entrypoint.replace('"', "\\\"");
    let config_content = format!(
        r#"name: "{safe_name}"
entrypoint: "{safe_entrypoint}"

# development: foreground auto-reloading server
# production: multi-worker process manager, exec handoff
mode: development

# Uncomment to resolve commands from an isolated installation
# venv: .venv

env_file: .env

migration:
  program: flask
  args: ["db", "upgrade"]

server:
  dev_program: flask
  dev_args: ["run"]
  prod_program: gunicorn
  app_module: "app:app"
  workers: 3
  timeout_secs: 120
  # bind: "0.0.0.0:8000"
"#
    );
    let config_path = project_dir.join("runway.yml");
    fs::write(&config_path, config_content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    // Placeholder .env so the default env_file resolves
    let env_path = project_dir.join(".env");
    fs::write(&env_path, "# Variables here are merged into every launched command\n")
        .with_context(|| format!("Failed to write {}", env_path.display()))?;

    println!("  Created: {}", config_path.display());
    println!("  Created: {}", env_path.display());
    println!("\nNext steps:");
    println!("  cd {}", args.name);
    println!("  runway plan      # inspect the resolved commands");
    println!("  runway up        # migrate and launch");

    Ok(())
}
