//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use rw_core::Mode;

/// Runway - a configuration-driven bootstrap launcher for web applications
#[derive(Parser, Debug)]
#[command(name = "runway")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the launch mode from runway.yml
    #[arg(short, long, global = true, value_enum)]
    pub mode: Option<ModeArg>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bootstrap the application: migrate, then hand off to the server
    Up(UpArgs),

    /// Run the schema migration step only
    Migrate,

    /// Show the resolved command sequence without executing anything
    Plan(PlanArgs),

    /// Scaffold a new Runway project
    Init(InitArgs),
}

/// Launch mode override
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    /// Foreground auto-reloading development server
    Development,
    /// Multi-worker production process manager
    Production,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Mode {
        match mode {
            ModeArg::Development => Mode::Development,
            ModeArg::Production => Mode::Production,
        }
    }
}

/// Arguments for the up command
#[derive(Args, Debug)]
pub struct UpArgs {
    /// Skip the migration step
    #[arg(long)]
    pub no_migrate: bool,
}

/// Arguments for the plan command
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: PlanOutput,

    /// Include the migration step even when config skips it
    #[arg(long)]
    pub with_migrate: bool,
}

/// Plan output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutput {
    /// Human-readable step listing
    Table,
    /// JSON output
    Json,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Name of the project directory to create
    pub name: String,

    /// Application entry-point file
    #[arg(long, default_value = "app.py")]
    pub entrypoint: String,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
