//! Integration tests driving the `runway` binary end to end.
//!
//! Fixture projects use small shell scripts as the migration tool and the
//! server so that invocation order, exit-status propagation, and exported
//! environment variables are observable from the outside.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Path to the compiled runway binary.
fn runway_bin() -> String {
    env!("CARGO_BIN_EXE_runway").to_string()
}

/// Write an executable script into the project directory.
fn write_script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Create a project whose migration and server commands append to a log
/// file, with the given exit status for the migration step.
fn recording_project(migrate_status: i32) -> TempDir {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let root = tmp.path();

    write_script(
        root,
        "fake-migrate",
        &format!("echo \"migrate FLASK_APP=$FLASK_APP FLASK_ENV=$FLASK_ENV\" >> log.txt\nexit {migrate_status}"),
    );
    write_script(
        root,
        "fake-serve",
        "echo \"serve FLASK_APP=$FLASK_APP FLASK_ENV=$FLASK_ENV\" >> log.txt",
    );

    fs::write(
        root.join("runway.yml"),
        r#"name: fixture
entrypoint: app.py
migration:
  program: ./fake-migrate
  args: []
server:
  dev_program: ./fake-serve
  dev_args: []
  prod_program: ./fake-serve
  handoff: wait
"#,
    )
    .unwrap();

    tmp
}

/// Run runway with args in the given project directory.
fn run_runway(root: &Path, args: &[&str]) -> std::process::Output {
    Command::new(runway_bin())
        .args(args)
        .current_dir(root)
        .output()
        .expect("Failed to run runway")
}

fn read_log(root: &Path) -> String {
    fs::read_to_string(root.join("log.txt")).unwrap_or_default()
}

#[test]
fn up_runs_migrate_then_serve_in_order() {
    let project = recording_project(0);
    let output = run_runway(project.path(), &["up"]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let log = read_log(project.path());
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2, "log: {log}");
    assert!(lines[0].starts_with("migrate "));
    assert!(lines[1].starts_with("serve "));
}

#[test]
fn up_exports_entry_and_mode_to_every_step() {
    let project = recording_project(0);
    run_runway(project.path(), &["up"]);

    let log = read_log(project.path());
    for line in log.lines() {
        assert!(line.contains("FLASK_APP=app.py"), "line: {line}");
        assert!(line.contains("FLASK_ENV=development"), "line: {line}");
    }
}

#[test]
fn failed_migration_propagates_status_and_skips_server() {
    let project = recording_project(7);
    let output = run_runway(project.path(), &["up"]);

    assert_eq!(output.status.code(), Some(7));
    let log = read_log(project.path());
    assert!(log.contains("migrate "));
    assert!(!log.contains("serve "), "server must not run: {log}");
}

#[test]
fn mode_override_changes_exported_flag() {
    let project = recording_project(0);
    run_runway(project.path(), &["up", "--mode", "production"]);

    let log = read_log(project.path());
    assert!(log.contains("FLASK_ENV=production"), "log: {log}");
}

#[test]
fn no_migrate_flag_skips_the_migration_step() {
    let project = recording_project(0);
    let output = run_runway(project.path(), &["up", "--no-migrate"]);

    assert!(output.status.success());
    let log = read_log(project.path());
    assert!(!log.contains("migrate "));
    assert!(log.contains("serve "));
}

#[test]
fn migrate_command_runs_only_the_migration() {
    let project = recording_project(0);
    let output = run_runway(project.path(), &["migrate"]);

    assert!(output.status.success());
    let log = read_log(project.path());
    assert!(log.contains("migrate "));
    assert!(!log.contains("serve "));
}

#[test]
fn migrate_failure_propagates_exit_status() {
    let project = recording_project(3);
    let output = run_runway(project.path(), &["migrate"]);

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn plan_executes_nothing() {
    let project = recording_project(0);
    let output = run_runway(project.path(), &["plan"]);

    assert!(output.status.success());
    assert!(!project.path().join("log.txt").exists());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("./fake-migrate"));
    assert!(stdout.contains("./fake-serve"));
}

#[test]
fn plan_json_output_is_valid_and_omits_env() {
    let project = recording_project(0);
    fs::write(project.path().join(".env"), "SECRET_KEY=hunter2\n").unwrap();
    let output = run_runway(project.path(), &["plan", "--output", "json"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON plan");
    assert_eq!(value["mode"], "development");
    assert_eq!(value["handoff"], "wait");
    assert!(!stdout.contains("hunter2"));
}

#[test]
fn missing_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let output = run_runway(tmp.path(), &["up"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("runway.yml"), "stderr: {stderr}");
}

#[test]
fn missing_venv_fails_before_any_command_runs() {
    let project = recording_project(0);
    let mut config = fs::read_to_string(project.path().join("runway.yml")).unwrap();
    config.push_str("venv: .venv\n");
    fs::write(project.path().join("runway.yml"), config).unwrap();

    let output = run_runway(project.path(), &["up"]);
    assert!(!output.status.success());
    assert!(!project.path().join("log.txt").exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Virtual environment"), "stderr: {stderr}");
}

#[test]
fn init_scaffolds_a_loadable_project() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Command::new(runway_bin())
        .args(["init", "storefront"])
        .current_dir(tmp.path())
        .output()
        .expect("Failed to run runway init");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let project = tmp.path().join("storefront");
    assert!(project.join("runway.yml").is_file());
    assert!(project.join(".env").is_file());

    // The scaffolded config parses and plans cleanly
    let output = run_runway(&project, &["plan"]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("flask db upgrade"));
}

#[test]
fn init_rejects_path_traversal_names() {
    let tmp = tempfile::tempdir().unwrap();
    let output = Command::new(runway_bin())
        .args(["init", "../escape"])
        .current_dir(tmp.path())
        .output()
        .expect("Failed to run runway init");
    assert!(!output.status.success());
}
