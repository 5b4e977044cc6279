//! # Formatter Tool Resolution
//!
//! File: cli/src/commands/format/tools.rs
//!
//! Resolves the two formatter executables once, at the start of
//! `carbon-tools format`. The result is a plain value (`ResolvedTools`) handed
//! to the dispatcher.
//!
//! clang-format is searched as:
//! 1. `tools.clang_format` from the configuration, when set;
//! 2. the unversioned `clang-format`;
//! 3. `clang-format-N` for N from `format.max_clang_format_version` down to 2.
//!
//! cmake-format is optional: `tools.cmake_format`, then `cmake-format`.
//!
use crate::common::system::ToolLocator;
use crate::core::config::Config;
use std::path::PathBuf;
use tracing::{debug, warn};

const CLANG_FORMAT: &str = "clang-format";
const CMAKE_FORMAT: &str = "cmake-format";

/// Executables used for one formatting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTools {
    pub clang_format: PathBuf,
    /// `None` when cmake-format is not installed; build descriptors are then skipped.
    pub cmake_format: Option<PathBuf>,
}

impl ResolvedTools {
    /// Returns `None` when no clang-format can be found.
    pub fn resolve<L: ToolLocator>(locator: &L, config: &Config) -> Option<Self> {
        let clang_format = resolve_clang_format(
            locator,
            config.tools.clang_format.as_deref(),
            config.format.max_clang_format_version,
        )?;
        let cmake_format = resolve_configured(locator, config.tools.cmake_format.as_deref())
            .or_else(|| locator.locate(CMAKE_FORMAT));
        debug!(
            "Using clang-format at {}, cmake-format at {:?}",
            clang_format.display(),
            cmake_format
        );
        Some(Self {
            clang_format,
            cmake_format,
        })
    }
}

/// Finds a clang-format executable.
///
/// ## Arguments
///
/// * `locator` - PATH lookup (or a fake in tests).
/// * `configured` - `tools.clang_format`; wins when it resolves.
/// * `max_version` - Highest `clang-format-N` suffix probed.
///
/// ## Returns
///
/// * `Some(PathBuf)` - The first candidate found, in the order listed in the module docs.
/// * `None` - No clang-format at all; the format command then exits successfully without work.
pub fn resolve_clang_format<L: ToolLocator>(
    locator: &L,
    configured: Option<&str>,
    max_version: u32,
) -> Option<PathBuf> {
    resolve_configured(locator, configured)
        .or_else(|| locator.locate(CLANG_FORMAT))
        .or_else(|| {
            (2..=max_version)
                .rev()
                .find_map(|version| locator.locate(&format!("{CLANG_FORMAT}-{version}")))
        })
}

fn resolve_configured<L: ToolLocator>(locator: &L, configured: Option<&str>) -> Option<PathBuf> {
    let path = configured?;
    let resolved = locator.locate(path);
    if resolved.is_none() {
        warn!(
            "Configured tool '{}' was not found; falling back to a PATH search.",
            path
        );
    }
    resolved
}
