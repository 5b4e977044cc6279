//! # Formatter Dispatch
//!
//! File: cli/src/commands/format/dispatch.rs
//!
//! Routes each target file to the matching formatter and runs it.
//!
//! - Source files (name ends with a configured suffix) go to clang-format.
//! - Build descriptors (name is exactly `CMakeLists.txt`) go to cmake-format.
//! - Anything else is skipped without output.
//!
//! The first formatter invocation that exits non-zero aborts the whole run
//! with `CarbonError::FormatterFailed`, whose status becomes the process exit
//! code.
//!
use super::tools::ResolvedTools;
use crate::common::process::{CommandRunner, Invocation};
use crate::core::error::{CarbonError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use walkdir::{DirEntry, WalkDir};

/// File name routed to cmake-format.
pub const BUILD_DESCRIPTOR: &str = "CMakeLists.txt";

/// Whether formatters rewrite files or only verify them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Write,
    Check,
}

/// Which formatters a file is routed to. Both may apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileRoute {
    pub source: bool,
    pub build: bool,
}

/// Decides which formatters apply to `path`.
///
/// Only the file name is inspected, never the contents. A name matching
/// neither rule yields the default (empty) route and the file is skipped.
///
/// ## Arguments
///
/// * `path` - Target file, relative or absolute.
/// * `extensions` - Source suffixes from `format.extensions`, e.g. `.cpp`.
///
/// ## Returns
///
/// * `FileRoute` - `source` on a suffix match, `build` when the name is exactly `CMakeLists.txt`.
pub fn classify(path: &Path, extensions: &[String]) -> FileRoute {
    let Some(name) = path.file_name().map(|n| n.to_string_lossy()) else {
        return FileRoute::default();
    };
    FileRoute {
        source: extensions.iter().any(|ext| name.ends_with(ext.as_str())),
        build: name == BUILD_DESCRIPTOR,
    }
}

/// clang-format command line for `file`, always reading the project's `.clang-format`.
pub fn clang_format_invocation(clang_format: &Path, mode: FormatMode, file: &Path) -> Invocation {
    let file = file.to_string_lossy().into_owned();
    let args: Vec<String> = match mode {
        FormatMode::Write => vec!["-i".into(), "--style=file".into(), file],
        // -Werror turns "would reformat" into a non-zero exit.
        FormatMode::Check => vec![
            "--dry-run".into(),
            "-Werror".into(),
            "--style=file".into(),
            file,
        ],
    };
    Invocation::new(clang_format, args)
}

/// cmake-format command line. The file is passed twice: as output (`-o`)
/// or `--check` target, and as input.
pub fn cmake_format_invocation(cmake_format: &Path, mode: FormatMode, file: &Path) -> Invocation {
    let file = file.to_string_lossy().into_owned();
    let flag = match mode {
        FormatMode::Write => "-o",
        FormatMode::Check => "--check",
    };
    Invocation::new(cmake_format, [flag.to_string(), file.clone(), file])
}

/// Formats one file, returning `FormatterFailed` on the first non-zero status.
pub fn format_file<R: CommandRunner>(
    runner: &R,
    tools: &ResolvedTools,
    mode: FormatMode,
    extensions: &[String],
    file: &Path,
) -> Result<()> {
    let route = classify(file, extensions);
    if route.source {
        println!("Formatting {}", file.display());
        run_checked(
            runner,
            &clang_format_invocation(&tools.clang_format, mode, file),
            file,
        )?;
    }
    if route.build {
        match &tools.cmake_format {
            Some(cmake_format) => {
                println!("Formatting {}", file.display());
                run_checked(
                    runner,
                    &cmake_format_invocation(cmake_format, mode, file),
                    file,
                )?;
            }
            None => debug!("cmake-format not installed, skipping {}", file.display()),
        }
    }
    Ok(())
}

// Spawn failures count as status 1 so they stop the run like any other failure.
fn run_checked<R: CommandRunner>(runner: &R, invocation: &Invocation, file: &Path) -> Result<()> {
    let status = match runner.run_status(invocation) {
        Ok(status) => status,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };
    if status == 0 {
        return Ok(());
    }
    let tool = invocation
        .program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| invocation.program.display().to_string());
    Err(CarbonError::FormatterFailed {
        tool,
        file: file.display().to_string(),
        status,
    }
    .into())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Lazily yields the regular files below `directory`, depth-first, sorted by
/// name within each directory. Hidden files and directories are skipped.
pub fn walk_files(directory: &Path) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    WalkDir::new(directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.path().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(anyhow::Error::new(e)
                .context(format!("Failed to walk {}", directory.display())))),
        })
}
