//! # carbon-tools Format Command
//!
//! File: cli/src/commands/format/mod.rs
//!
//! ## Overview
//!
//! `carbon-tools format` runs clang-format over C/C++/Objective-C sources and
//! cmake-format over `CMakeLists.txt` files, either rewriting them in place
//! (`--write`) or only checking them (the default, `--no-write`).
//!
//! ## Architecture
//!
//! - `tools`: resolves the formatter executables once per run.
//! - `dispatch`: classifies files and runs the matching formatter.
//!
//! The run ends early, with a message and a success status, when clang-format
//! is not installed or the working directory has no `.clang-format` style
//! file. Otherwise files are formatted one by one, directory entries first,
//! then the explicit file names. The first formatter failure stops the run
//! and its exit status becomes the process exit status.
//!
//! ## Examples
//!
//! ```bash
//! # Check every source below src/ (CI mode)
//! carbon-tools format --directory src
//!
//! # Rewrite two files in place
//! carbon-tools format --write src/renderer.cpp CMakeLists.txt
//! ```
//!
use crate::common::process::{CommandRunner, SystemRunner};
use crate::common::system::{PathLocator, ToolLocator};
use crate::core::config::{self, Config};
use crate::core::error::{CarbonError, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

mod dispatch;
mod tools;

pub use dispatch::FormatMode;
use tools::ResolvedTools;

/// Style file clang-format is pointed at via `--style=file`.
const STYLE_FILE: &str = ".clang-format";

/// Arguments for `carbon-tools format`.
#[derive(Parser, Debug, Default)]
#[command(
    about = "Format C/C++ sources and CMakeLists.txt files",
    long_about = "Runs clang-format (and cmake-format when installed) on the given files.\n\
                  Without --write, files are only checked and the first badly formatted\n\
                  file makes the command exit with the formatter's status."
)]
pub struct FormatArgs {
    /// Write the formatted files to disk
    #[arg(long, overrides_with = "no_write")]
    pub write: bool,

    /// Only check formatting, never modify files (default)
    #[arg(long, overrides_with = "write")]
    pub no_write: bool,

    /// The directory to format (walked recursively)
    #[arg(long, value_name = "PATH")]
    pub directory: Option<PathBuf>,

    /// A list of files to format
    pub filenames: Vec<PathBuf>,
}

impl FormatArgs {
    /// Effective mode. Check unless `--write` was the last of the two flags given.
    pub fn mode(&self) -> FormatMode {
        if self.write && !self.no_write {
            FormatMode::Write
        } else {
            FormatMode::Check
        }
    }
}

/// Main handler for `carbon-tools format`.
pub async fn handle_format(args: FormatArgs) -> Result<()> {
    info!("Handling format command...");
    let config = config::load_config()?;
    let working_dir = std::env::current_dir()?;
    run_format(&args, &config, &PathLocator, &SystemRunner, &working_dir)
}

/// Resolves the tools, checks for the style file and formats every target.
pub fn run_format<L: ToolLocator, R: CommandRunner>(
    args: &FormatArgs,
    config: &Config,
    locator: &L,
    runner: &R,
    working_dir: &Path,
) -> Result<()> {
    let Some(tools) = ResolvedTools::resolve(locator, config) else {
        println!("Could not find clang-format");
        return Ok(());
    };

    if !working_dir.join(STYLE_FILE).is_file() {
        println!("No {STYLE_FILE} file found in the current directory");
        return Ok(());
    }

    let mode = args.mode();
    let extensions = &config.format.extensions;
    info!("Formatting in {:?} mode", mode);

    if let Some(directory) = &args.directory {
        if !directory.is_dir() {
            return Err(CarbonError::FileSystem(format!(
                "'{}' is not a directory",
                directory.display()
            ))
            .into());
        }
        for file in dispatch::walk_files(directory) {
            dispatch::format_file(runner, &tools, mode, extensions, &file?)?;
        }
    }

    for file in &args.filenames {
        dispatch::format_file(runner, &tools, mode, extensions, file)?;
    }

    info!("Finished formatting.");
    Ok(())
}
