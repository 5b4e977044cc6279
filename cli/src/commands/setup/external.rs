//! # External Dependency Archives
//!
//! File: cli/src/commands/setup/external.rs
//!
//! ## Overview
//!
//! Some third-party libraries are not available through vcpkg and are pulled
//! as prebuilt release archives into `external/<name>/` instead.
//!
//! Each dependency is described by an `ExternalDependency` table entry. The
//! download URL is a pure function of the entry, its version and the host
//! platform (`archive_url`); a platform without a published build yields
//! `None`.
//!
//! ## Acquisition
//!
//! `acquire` brings `external/<name>/` in line with the platform:
//! - no build for this platform: any copy left from an earlier run (e.g. a
//!   checkout shared with a Linux machine) is deleted and nothing is created;
//! - otherwise the archive is downloaded to `external/<name>/<name>.zip`,
//!   extracted next to it and deleted again, also when extraction fails.
//!
use crate::common::archive::zip::extract_zip;
use crate::common::fs::io::{ensure_dir_exists, remove_dir_if_exists, remove_file_if_exists};
use crate::common::network::Fetcher;
use crate::common::system::Platform;
use crate::core::config::SetupConfig;
use crate::core::error::Result;
use std::path::Path;
use tracing::{debug, info, warn};

/// A third-party library distributed as per-platform zip releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalDependency {
    pub name: &'static str,
    pub default_version: &'static str,
    /// Release URL with `{version}` and `{suffix}` placeholders.
    pub url_template: &'static str,
    pub windows_suffix: Option<&'static str>,
    pub linux_suffix: Option<&'static str>,
    pub macos_suffix: Option<&'static str>,
}

/// Dependencies fetched by `carbon-tools setup`, in order.
pub const EXTERNAL_DEPENDENCIES: &[ExternalDependency] = &[ExternalDependency {
    name: "slang",
    default_version: "0.23.2",
    url_template:
        "https://github.com/shader-slang/slang/releases/download/v{version}/slang-{version}-{suffix}.zip",
    windows_suffix: Some("win64"),
    linux_suffix: Some("linux-x86_64"),
    macos_suffix: None,
}];

impl ExternalDependency {
    /// Version to fetch, honouring `setup.external_versions` overrides.
    pub fn version<'a>(&'a self, config: &'a SetupConfig) -> &'a str {
        config
            .external_versions
            .get(self.name)
            .map(String::as_str)
            .unwrap_or(self.default_version)
    }

    fn suffix(&self, platform: Platform) -> Option<&'static str> {
        match platform {
            Platform::Windows => self.windows_suffix,
            Platform::Linux => self.linux_suffix,
            Platform::MacOs => self.macos_suffix,
        }
    }
}

/// Download URL of `dependency` for `platform`, or `None` when no build is published.
pub fn archive_url(
    dependency: &ExternalDependency,
    version: &str,
    platform: Platform,
) -> Option<String> {
    let suffix = dependency.suffix(platform)?;
    Some(
        dependency
            .url_template
            .replace("{version}", version)
            .replace("{suffix}", suffix),
    )
}

/// What `acquire` did for one dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// Archive downloaded and extracted.
    Installed { files: usize },
    /// No build for this platform; `removed_stale` tells whether an old copy was deleted.
    Unsupported { removed_stale: bool },
}

/// Downloads and extracts `dependency` below `external_root`.
pub async fn acquire<F: Fetcher>(
    fetcher: &F,
    external_root: &Path,
    dependency: &ExternalDependency,
    version: &str,
    platform: Platform,
) -> Result<Acquisition> {
    let target_dir = external_root.join(dependency.name);

    let Some(url) = archive_url(dependency, version, platform) else {
        let removed_stale = remove_dir_if_exists(&target_dir)?;
        if removed_stale {
            info!(
                "Removed stale {} at {}",
                dependency.name,
                target_dir.display()
            );
        }
        return Ok(Acquisition::Unsupported { removed_stale });
    };

    ensure_dir_exists(&target_dir)?;
    let archive = target_dir.join(format!("{}.zip", dependency.name));
    debug!("Fetching {} {} from {}", dependency.name, version, url);

    let extracted = match fetcher.fetch(&url, &archive).await {
        Ok(bytes) => {
            debug!("Fetched {} bytes", bytes);
            extract_zip(&archive, &target_dir)
        }
        Err(e) => Err(e),
    };

    if let Err(e) = remove_file_if_exists(&archive) {
        warn!("Could not remove temporary archive: {:#}", e);
    }

    Ok(Acquisition::Installed { files: extracted? })
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::testing::{zip_bytes, FakeFetcher};
    use std::fs;
    use tempfile::tempdir;

    fn slang() -> &'static ExternalDependency {
        &EXTERNAL_DEPENDENCIES[0]
    }

    #[test]
    fn test_archive_url_per_platform() {
        assert_eq!(
            archive_url(slang(), "0.23.2", Platform::Windows).as_deref(),
            Some("https://github.com/shader-slang/slang/releases/download/v0.23.2/slang-0.23.2-win64.zip")
        );
        assert_eq!(
            archive_url(slang(), "0.23.2", Platform::Linux).as_deref(),
            Some("https://github.com/shader-slang/slang/releases/download/v0.23.2/slang-0.23.2-linux-x86_64.zip")
        );
        assert_eq!(archive_url(slang(), "0.23.2", Platform::MacOs), None);
    }

    #[test]
    fn test_version_override() {
        let mut config = SetupConfig::default();
        assert_eq!(slang().version(&config), "0.23.2");
        config
            .external_versions
            .insert("slang".into(), "0.24.0".into());
        assert_eq!(slang().version(&config), "0.24.0");
    }

    #[tokio::test]
    async fn test_acquire_extracts_and_removes_archive() {
        let temp_dir = tempdir().unwrap();
        let external = temp_dir.path().join("external");
        let fetcher = FakeFetcher::serving(zip_bytes(&[("bin/slangc", "compiler")]));

        let outcome = acquire(&fetcher, &external, slang(), "0.23.2", Platform::Linux)
            .await
            .unwrap();

        assert_eq!(outcome, Acquisition::Installed { files: 1 });
        assert_eq!(
            fs::read_to_string(external.join("slang/bin/slangc")).unwrap(),
            "compiler"
        );
        assert!(!external.join("slang/slang.zip").exists());
        assert_eq!(fetcher.requested_urls().len(), 1);
    }

    #[tokio::test]
    async fn test_acquire_unsupported_removes_stale_copy() {
        let temp_dir = tempdir().unwrap();
        let external = temp_dir.path().join("external");
        fs::create_dir_all(external.join("slang/bin")).unwrap();
        fs::write(external.join("slang/bin/slangc"), "old linux build").unwrap();
        let fetcher = FakeFetcher::failing();

        let outcome = acquire(&fetcher, &external, slang(), "0.23.2", Platform::MacOs)
            .await
            .unwrap();

        assert_eq!(outcome, Acquisition::Unsupported { removed_stale: true });
        assert!(!external.join("slang").exists());
        assert!(fetcher.requested_urls().is_empty());

        // Re-running is a no-op.
        let again = acquire(&fetcher, &external, slang(), "0.23.2", Platform::MacOs)
            .await
            .unwrap();
        assert_eq!(again, Acquisition::Unsupported { removed_stale: false });
    }

    #[tokio::test]
    async fn test_acquire_download_failure_is_error_without_leftovers() {
        let temp_dir = tempdir().unwrap();
        let external = temp_dir.path().join("external");
        let fetcher = FakeFetcher::failing();

        let result = acquire(&fetcher, &external, slang(), "0.23.2", Platform::Windows).await;

        assert!(result.is_err());
        assert!(!external.join("slang/slang.zip").exists());
    }

    #[tokio::test]
    async fn test_acquire_corrupt_archive_is_cleaned_up() {
        let temp_dir = tempdir().unwrap();
        let external = temp_dir.path().join("external");
        let fetcher = FakeFetcher::serving(b"<html>not a zip</html>".to_vec());

        let result = acquire(&fetcher, &external, slang(), "0.23.2", Platform::Linux).await;

        assert!(result.is_err());
        assert!(!external.join("slang/slang.zip").exists());
    }
}
