//! # carbon-tools CLI Setup Integration Tests
//!
//! File: cli/tests/setup.rs
//!
//! ## Overview
//!
//! Integration tests for `carbon-tools setup`. A full run needs the network
//! and host tools (git, vcpkg, cmake), so the step sequence is covered by the
//! unit tests in `commands/setup/workflow.rs`. Here only the behaviour that is
//! deterministic on any machine is checked.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_setup_help() {
    carbon_cmd()
        .args(["setup", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Prepare the project for building"));
}

#[test]
fn test_setup_rejects_arguments() {
    carbon_cmd().args(["setup", "all"]).assert().failure();
}

#[test]
fn test_version_gate_stops_setup_cleanly() {
    let project = project_dir();
    write_project_config(project.path(), "[setup]\nminimum_version = \"99.0.0\"\n");

    carbon_cmd_in(project.path())
        .arg("setup")
        .assert()
        .success()
        .stdout(predicate::str::contains("Setting up project..."))
        .stdout(predicate::str::contains("99.0.0 or later is required"))
        .stdout(predicate::str::contains("Finished configuring").not())
        .stderr(predicate::str::contains("Error").not());

    assert!(!project.path().join("build").exists());
    assert!(!project.path().join("external").exists());
}

#[test]
fn test_invalid_project_config_is_error() {
    let project = project_dir();
    write_project_config(project.path(), "[setup]\nunknown_key = 1\n");

    carbon_cmd_in(project.path())
        .arg("setup")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
