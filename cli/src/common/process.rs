//! # carbon-tools Process Execution Utilities (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Every external tool (clang-format, cmake-format, cmake, vcpkg, git,
//! pre-commit) is started through the `CommandRunner` trait. Commands describe
//! *what* to run as an `Invocation`; the runner decides *how*:
//!
//! - **`run_quiet`**: stdout/stderr discarded, only success/failure reported.
//!   Used by the setup workflow, whose logs stay limited to its own status lines.
//! - **`run_status`**: stdio inherited, exit code returned. Used by the
//!   formatter, which must propagate the tool's status.
//!
//! `SystemRunner` is the real implementation on top of `std::process::Command`.
//! Tests use recording fakes so command logic can be checked without spawning
//! anything.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{CommandRunner, Invocation, SystemRunner};
//!
//! let git = Invocation::new("git", ["submodule", "update", "--init", "--recursive"]);
//! let succeeded = SystemRunner.run_quiet(&git);
//! ```
//!
use crate::core::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// A fully described external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name or resolved path.
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Working directory; `None` inherits the current one.
    pub cwd: Option<PathBuf>,
    /// Run through `cmd /C`. Only honoured on Windows hosts.
    pub shell: bool,
}

impl Invocation {
    /// Creates an invocation that runs directly (no shell) in the current directory.
    ///
    /// ## Arguments
    ///
    /// * `program` - Executable name, looked up on `PATH` at spawn time, or a resolved path.
    /// * `args` - Arguments passed verbatim, one per item.
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<PathBuf>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: None,
            shell: false,
        }
    }

    /// Sets the working directory of the spawned process.
    pub fn in_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Requests `cmd /C` wrapping. Ignored outside Windows, where the program runs directly.
    pub fn with_shell(mut self, shell: bool) -> Self {
        self.shell = shell;
        self
    }

    /// Human-readable command line, used in logs and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    fn to_command(&self) -> Command {
        // Windows resolves `.bat`/`.cmd` wrappers only through cmd.exe.
        let mut command = if self.shell && cfg!(windows) {
            let mut shell = Command::new("cmd");
            shell.arg("/C").arg(&self.program).args(&self.args);
            shell
        } else {
            let mut direct = Command::new(&self.program);
            direct.args(&self.args);
            direct
        };
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }
}

/// Runs external commands on behalf of the commands.
pub trait CommandRunner {
    /// Runs with output discarded and reports whether the command exited successfully.
    /// A command that cannot be started counts as a failure.
    fn run_quiet(&self, invocation: &Invocation) -> bool;

    /// Runs with inherited stdio and returns the exit code.
    /// A process terminated by a signal reports `1`.
    fn run_status(&self, invocation: &Invocation) -> Result<i32>;
}

/// `CommandRunner` backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_quiet(&self, invocation: &Invocation) -> bool {
        debug!("Running (quiet): {}", invocation.command_line());
        let status = invocation
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) => {
                debug!("'{}' exited with {}", invocation.command_line(), status);
                status.success()
            }
            Err(e) => {
                warn!("Failed to start '{}': {}", invocation.command_line(), e);
                false
            }
        }
    }

    fn run_status(&self, invocation: &Invocation) -> Result<i32> {
        debug!("Running: {}", invocation.command_line());
        let status = invocation
            .to_command()
            .status()
            .with_context(|| format!("Failed to start '{}'", invocation.command_line()))?;
        debug!("'{}' exited with {}", invocation.command_line(), status);
        Ok(status.code().unwrap_or(1))
    }
}
