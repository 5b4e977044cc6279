//! # carbon-tools ZIP Archive Operations (`common::archive::zip`)
//!
//! File: cli/src/common/archive/zip.rs
//!
//! ## Overview
//!
//! Extracts the `.zip` release archives the setup workflow downloads (e.g.
//! the slang binaries) into their `external/<name>/` directory.
//!
//! Entries whose names would escape the destination (absolute paths, `..`)
//! are skipped. On Unix the stored permission bits are restored so extracted
//! executables stay runnable.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::zip;
//! use std::path::Path;
//!
//! let extracted = zip::extract_zip(Path::new("external/slang/slang.zip"), Path::new("external/slang"))?;
//! ```
//!
use crate::core::error::{CarbonError, Result};
use anyhow::Context;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Extracts every file of `archive_path` below `dest_dir`.
///
/// Returns the number of files written. Existing files are overwritten.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<usize> {
    info!(
        "Extracting {} to {}",
        archive_path.display(),
        dest_dir.display()
    );
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("Failed to create directory: {}", dest_dir.display()))?;

    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open zip: {}", archive_path.display()))?;
    let mut archive = ::zip::ZipArchive::new(file).map_err(|e| {
        CarbonError::Archive(format!(
            "'{}' is not a readable zip archive: {}",
            archive_path.display(),
            e
        ))
    })?;

    let mut written = 0;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| CarbonError::Archive(format!("Failed to read entry {}: {}", i, e)))?;
        let Some(entry_path) = entry.enclosed_name() else {
            warn!("Skipping unsafe path in zip: {}", entry.name());
            continue;
        };
        let dest_path = dest_dir.join(entry_path);

        if entry.is_dir() {
            fs::create_dir_all(&dest_path)
                .with_context(|| format!("Failed to create: {}", dest_path.display()))?;
            continue;
        }
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create: {}", parent.display()))?;
        }
        let mut outfile = File::create(&dest_path)
            .with_context(|| format!("Failed to create: {}", dest_path.display()))?;
        io::copy(&mut entry, &mut outfile)
            .with_context(|| format!("Failed to extract: {}", dest_path.display()))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&dest_path, fs::Permissions::from_mode(mode))
                .with_context(|| format!("Failed to set permissions: {}", dest_path.display()))?;
        }
        written += 1;
    }

    debug!("ZIP extraction complete: {} files", written);
    Ok(written)
}
