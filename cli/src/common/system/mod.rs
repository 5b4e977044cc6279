//! # carbon-tools System Utilities Module (`common::system`)
//!
//! File: cli/src/common/system/mod.rs
//!
//! ## Overview
//!
//! Host inspection shared by both commands:
//!
//! - **`Platform`**: the host operating system, detected once at command start
//!   and matched exhaustively wherever behaviour differs between Windows,
//!   Linux and macOS.
//! - **`ToolLocator`**: resolves external executables. `PathLocator` searches
//!   `PATH` with the `which` crate; tests substitute their own locator to
//!   simulate installed or missing tools.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::system::{Platform, PathLocator, ToolLocator};
//!
//! let platform = Platform::detect()?;
//! if PathLocator.locate("cmake").is_none() {
//!     println!("cmake is not installed on {}", platform);
//! }
//! ```
//!
use crate::core::error::{CarbonError, Result};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Host operating systems the tooling knows how to provision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// Detects the platform this binary was built for.
    pub fn detect() -> Result<Self> {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps a `std::env::consts::OS` value onto a supported platform.
    pub fn from_os_name(os: &str) -> Result<Self> {
        match os {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" => Ok(Platform::MacOs),
            other => Err(CarbonError::UnsupportedPlatform(other.to_string()).into()),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
            Platform::MacOs => "MacOS",
        };
        f.write_str(name)
    }
}

/// Resolves an executable name to a runnable path.
pub trait ToolLocator {
    /// Returns the resolved path, or `None` when the tool is not installed.
    fn locate(&self, name: &str) -> Option<PathBuf>;
}

/// Looks executables up on the host's `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathLocator;

impl ToolLocator for PathLocator {
    fn locate(&self, name: &str) -> Option<PathBuf> {
        match which::which(name) {
            Ok(path) => {
                debug!("Resolved '{}' to {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                debug!("Could not resolve '{}': {}", name, e);
                None
            }
        }
    }
}
