//! # carbon-tools Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout carbon-tools. Domain
//! failures are modelled by `CarbonError` (derived with `thiserror`), while
//! functions return `Result<T>`, an alias for `anyhow::Result<T>`, so context
//! can be attached freely on the way up.
//!
//! ## Architecture
//!
//! The error types cover:
//! - Configuration errors
//! - Filesystem errors
//! - Host platform and version string errors
//! - Download and archive extraction errors
//! - Formatter sub-command failures (carry the exit status to propagate)
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.is_dir() {
//!     return Err(CarbonError::FileSystem(format!("Not a directory: {}", path.display())))?;
//! }
//!
//! // Recover the exit status of a failed formatter run
//! if let Some(CarbonError::FormatterFailed { status, .. }) = err.downcast_ref::<CarbonError>() {
//!     std::process::exit(*status);
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for carbon-tools.
#[derive(Error, Debug)]
pub enum CarbonError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Unsupported host platform '{0}'. Supported platforms are Windows, Linux and macOS.")]
    UnsupportedPlatform(String),

    #[error("Invalid version string '{0}'. Expected MAJOR.MINOR.PATCH.")]
    InvalidVersion(String),

    #[error("Download of '{url}' failed: {reason}")]
    Download { url: String, reason: String },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("{tool} exited with status {status} while formatting '{file}'")]
    FormatterFailed {
        tool: String,
        file: String,
        status: i32,
    },
}

impl CarbonError {
    /// Exit code the process should terminate with when this error reaches `main`.
    pub fn exit_code(&self) -> i32 {
        match self {
            CarbonError::FormatterFailed { status, .. } => *status,
            _ => 1,
        }
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
