//! # carbon-tools Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Idempotent directory helpers used by the setup workflow:
//! - **`ensure_dir_exists`**: `mkdir -p`, refusing paths occupied by a non-directory.
//! - **`remove_dir_if_exists`**: recursive removal that is a no-op when the path is absent.
//! - **`remove_file_if_exists`**: same for single files (temporary archives).
//!
//! Running any of them twice yields the same filesystem state as running
//! them once, which is what lets `carbon-tools setup` be re-run safely.
//!
use crate::core::error::{CarbonError, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// Missing parents are created. If the path already exists but is not a
/// directory, `CarbonError::FileSystem` is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(CarbonError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Recursively removes a directory. Returns `true` if something was removed.
pub fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !path.exists() {
        debug!("Nothing to remove at {:?}", path);
        return Ok(false);
    }
    if !path.is_dir() {
        anyhow::bail!(CarbonError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    fs::remove_dir_all(path).with_context(|| format!("Failed to remove directory {:?}", path))?;
    info!("Removed directory: {:?}", path);
    Ok(true)
}

/// Removes a single file. Returns `true` if something was removed.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed file: {:?}", path);
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("Failed to remove file {:?}", path)),
    }
}
