//! # carbon-tools Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Entry point for filesystem helpers. Functionality lives in submodules and
//! is imported from them directly, e.g.
//! `use crate::common::fs::io::ensure_dir_exists;`.
//!
//! - **`io`**: idempotent directory and file creation/removal used by the setup workflow.
//!

/// Idempotent directory/file helpers (`ensure_dir_exists`, `remove_dir_if_exists`, ...).
pub mod io;
