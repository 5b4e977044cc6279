//! # carbon-tools Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utilities used by the command modules. Commands hold the
//! project-specific logic (which tools, which flags, which order); everything
//! that touches the host lives here behind small, swappable interfaces.
//!
//! - **`archive`**: extraction of downloaded `.zip` dependency archives.
//! - **`fs`**: idempotent directory and file helpers.
//! - **`network`**: the `Fetcher` trait and its `reqwest` implementation.
//! - **`process`**: the `CommandRunner` trait and `Invocation` description of external commands.
//! - **`system`**: host `Platform` detection and the `ToolLocator` trait (PATH lookup).
//! - **`ui`**: coloured status lines.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::process::{CommandRunner, Invocation, SystemRunner};
//! use crate::common::system::{PathLocator, Platform, ToolLocator};
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let platform = Platform::detect()?;
//! if let Some(cmake) = PathLocator.locate("cmake") {
//!     let ok = SystemRunner.run_quiet(&Invocation::new(cmake, ["--version"]));
//!     println!("cmake on {} works: {}", platform, ok);
//! }
//! # Ok(())
//! # }
//! ```
//!

/// Extraction of downloaded dependency archives.
pub mod archive;
/// Filesystem helpers (directory creation/removal).
pub mod fs;
/// Remote file retrieval.
pub mod network;
/// External command execution.
pub mod process;
/// Host platform detection and executable lookup.
pub mod system;
/// Coloured terminal status output.
pub mod ui;
/// Fakes for the locator/runner/fetcher seams used by unit tests.
#[cfg(test)]
pub mod testing;
