//! rw-core - Core library for Runway
//!
//! This crate provides configuration parsing, child-environment assembly,
//! launch-plan construction, and the process-execution seam used by the
//! Runway CLI to bootstrap a web application: migrate the database, then
//! hand control to a server process.

pub mod config;
pub mod environment;
pub mod error;
pub mod plan;
pub mod runner;

pub use config::{Config, EnvVarNames, Handoff, MigrationConfig, Mode, ServerConfig};
pub use environment::build_child_env;
pub use error::{CoreError, CoreResult};
pub use plan::{build_plan, CommandSpec, LaunchPlan};
pub use runner::{execute_plan, run_step, Phase, ProcessRunner, SystemRunner};
