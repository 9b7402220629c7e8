//! Runway CLI - bootstrap launcher: migrate the database, then hand off
//! to a development server or a production process manager

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{init, migrate, plan, up};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match &cli.command {
        cli::Commands::Up(args) => up::execute(args, &cli.global).await,
        cli::Commands::Migrate => migrate::execute(&cli.global).await,
        cli::Commands::Plan(args) => plan::execute(args, &cli.global).await,
        cli::Commands::Init(args) => init::execute(args).await,
    };

    if let Err(err) = result {
        // Failing bootstrap steps propagate the child's own exit status;
        // the child already wrote its diagnostics to stderr.
        if let Some(exit) = err.downcast_ref::<ExitCode>() {
            std::process::exit(exit.0);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
