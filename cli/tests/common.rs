//! # carbon-tools CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Each test
//! runs the compiled `carbon-tools` binary inside a throwaway project
//! directory whose `HOME` is redirected, so user configuration on the machine
//! running the tests never leaks in.
//!

// Not every test crate uses every helper.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command for the `carbon-tools` binary built for this test run.
pub fn carbon_cmd() -> Command {
    Command::cargo_bin("carbon-tools").expect("Failed to find carbon-tools binary for testing")
}

/// Command running inside `project` with an isolated home directory.
pub fn carbon_cmd_in(project: &Path) -> Command {
    let home = project.join(".home");
    fs::create_dir_all(&home).expect("create fake home");
    let mut cmd = carbon_cmd();
    cmd.current_dir(project)
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

/// Empty project root. The `.git` marker stops the upward config search here.
pub fn project_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("create project dir");
    fs::create_dir(dir.path().join(".git")).expect("create .git marker");
    dir
}

pub fn write_project_config(project: &Path, toml: &str) {
    fs::write(project.join(".carbon-tools.toml"), toml).expect("write project config");
}

/// Installs a fake formatter script that appends its arguments to
/// `<project>/<name>.log` and exits with `status`.
#[cfg(unix)]
pub fn fake_tool(project: &Path, name: &str, status: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = project.join(".bin");
    fs::create_dir_all(&bin).expect("create fake bin dir");
    let script = bin.join(name);
    let log = project.join(format!("{name}.log"));
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho \"$@\" >> '{}'\nexit {}\n",
            log.display(),
            status
        ),
    )
    .expect("write fake tool");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod fake tool");
    script
}

/// Lines logged by a `fake_tool`, empty when it never ran.
pub fn tool_log(project: &Path, name: &str) -> Vec<String> {
    fs::read_to_string(project.join(format!("{name}.log")))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
