//! # carbon-tools Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module loads, merges and validates the optional carbon-tools
//! configuration. Nothing is required: with no files present the built-in
//! defaults reproduce the stock behaviour of both commands.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.carbon-tools.toml` in the current directory or ancestors
//!    (the search stops at the first directory containing `.git`)
//! 2. User-specific `config.toml` in the platform config directory
//!    (e.g. `~/.config/carbon-tools/config.toml`)
//! 3. Default values defined in the code
//!
//! ## Examples
//!
//! ```toml
//! [format]
//! max_clang_format_version = 17
//!
//! [tools]
//! clang_format = "~/llvm/bin/clang-format"
//!
//! [setup]
//! minimum_version = "0.1.0"
//! external_versions = { slang = "0.23.2" }
//! ```
//!
//! The configuration is loaded once per command execution and passed
//! to the components that need it.
//!
use crate::core::error::{CarbonError, Result};
use crate::core::version::Version;
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub format: FormatConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub setup: SetupConfig,
}

/// Settings for `carbon-tools format`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FormatConfig {
    /// Highest versioned `clang-format-N` binary probed when the unversioned one is missing.
    #[serde(default = "default_max_clang_format_version")]
    pub max_clang_format_version: u32,
    /// File name suffixes routed to clang-format.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            max_clang_format_version: default_max_clang_format_version(),
            extensions: default_extensions(),
        }
    }
}

/// Explicit executable paths that bypass PATH lookup. `~` is expanded.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToolsConfig {
    pub clang_format: Option<String>,
    pub cmake_format: Option<String>,
}

/// Settings for `carbon-tools setup`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SetupConfig {
    /// Oldest carbon-tools release allowed to set up the project.
    #[serde(default = "default_minimum_version")]
    pub minimum_version: String,
    /// Per-dependency release overrides, keyed by dependency name.
    #[serde(default)]
    pub external_versions: HashMap<String, String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            minimum_version: default_minimum_version(),
            external_versions: HashMap::new(),
        }
    }
}

fn default_max_clang_format_version() -> u32 {
    14
}
fn default_extensions() -> Vec<String> {
    [".hpp", ".cpp", ".mm", ".m", ".c", ".h", ".cc", ".hh"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}
fn default_minimum_version() -> String {
    "0.1.0".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".carbon-tools.toml";

/// Loads the effective configuration.
///
/// The user file and the nearest `.carbon-tools.toml` are both optional;
/// project values win over user values, which win over the defaults.
/// Tool paths are `~`-expanded and the result is validated.
///
/// ## Returns
///
/// * `Result<Config>` - The merged configuration, or an error naming the
///   file that failed to read, parse or validate.
pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("org", "Carbon", "carbon-tools") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").exists() {
            debug!(
                "Found .git at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.format.max_clang_format_version =
        if project_cfg.format.max_clang_format_version != default_max_clang_format_version() {
            project_cfg.format.max_clang_format_version
        } else {
            user.format.max_clang_format_version
        };
    merged.format.extensions = if project_cfg.format.extensions != default_extensions() {
        project_cfg.format.extensions
    } else {
        user.format.extensions
    };
    merged.tools.clang_format = project_cfg.tools.clang_format.or(user.tools.clang_format);
    merged.tools.cmake_format = project_cfg.tools.cmake_format.or(user.tools.cmake_format);
    merged.setup.minimum_version =
        if project_cfg.setup.minimum_version != default_minimum_version() {
            project_cfg.setup.minimum_version
        } else {
            user.setup.minimum_version
        };
    // Project pins win per dependency; user pins fill the gaps.
    merged.setup.external_versions = user.setup.external_versions;
    merged
        .setup
        .external_versions
        .extend(project_cfg.setup.external_versions);
    merged
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    for tool in [&mut config.tools.clang_format, &mut config.tools.cmake_format]
        .into_iter()
        .flatten()
    {
        let expanded = shellexpand::tilde(tool.as_str()).into_owned();
        *tool = expanded;
        debug!("Expanded tool path: {}", tool);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.format.max_clang_format_version < 2 {
        return Err(anyhow!(CarbonError::Config(format!(
            "format.max_clang_format_version must be at least 2 (got {}).",
            config.format.max_clang_format_version
        ))));
    }
    for ext in &config.format.extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(anyhow!(CarbonError::Config(format!(
                "Invalid extension '{}' in format.extensions. Expected a suffix like '.cpp'.",
                ext
            ))));
        }
    }
    for (key, tool) in [
        ("tools.clang_format", &config.tools.clang_format),
        ("tools.cmake_format", &config.tools.cmake_format),
    ] {
        if tool.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(anyhow!(CarbonError::Config(format!(
                "{key} cannot be an empty path."
            ))));
        }
    }
    config
        .setup
        .minimum_version
        .parse::<Version>()
        .context("setup.minimum_version is not a valid version")?;
    for (name, version) in &config.setup.external_versions {
        if version.trim().is_empty() {
            return Err(anyhow!(CarbonError::Config(format!(
                "setup.external_versions.{name} cannot be empty."
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [format]
            max_clang_format_version = 17

            [tools]
            clang_format = "~/llvm/bin/clang-format"

            [setup]
            minimum_version = "0.2.0"
            external_versions = { slang = "2024.1.0" }
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.format.max_clang_format_version, 17);
        assert_eq!(config.format.extensions, default_extensions()); // Default
        assert_eq!(
            config.tools.clang_format.as_deref(),
            Some("~/llvm/bin/clang-format")
        ); // Not yet expanded
        assert_eq!(config.tools.cmake_format, None);
        assert_eq!(config.setup.minimum_version, "0.2.0");
        assert_eq!(config.setup.external_versions["slang"], "2024.1.0");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[format]\nbogus = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_project_values() {
        let mut user = Config::default();
        user.format.max_clang_format_version = 16;
        user.tools.cmake_format = Some("/opt/cmake-format".into());
        user.setup
            .external_versions
            .insert("slang".into(), "0.20.0".into());
        user.setup
            .external_versions
            .insert("other".into(), "1.0.0".into());

        let mut project = Config::default();
        project.tools.clang_format = Some("/opt/clang-format".into());
        project
            .setup
            .external_versions
            .insert("slang".into(), "0.23.2".into());

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.format.max_clang_format_version, 16);
        assert_eq!(merged.tools.clang_format.as_deref(), Some("/opt/clang-format"));
        assert_eq!(merged.tools.cmake_format.as_deref(), Some("/opt/cmake-format"));
        assert_eq!(merged.setup.external_versions["slang"], "0.23.2");
        assert_eq!(merged.setup.external_versions["other"], "1.0.0");
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            tools: ToolsConfig {
                clang_format: Some("~/bin/clang-format".into()),
                cmake_format: Some("/usr/bin/cmake-format".into()),
            },
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.tools.clang_format.unwrap(),
            home_dir.join("bin/clang-format").to_string_lossy()
        );
        assert_eq!(config.tools.cmake_format.unwrap(), "/usr/bin/cmake-format");
    }

    #[test]
    fn test_validate_config_defaults_ok() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_extension() {
        let config = Config {
            format: FormatConfig {
                extensions: vec!["cpp".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid extension"));
    }

    #[test]
    fn test_validate_config_invalid_minimum_version() {
        let config = Config {
            setup: SetupConfig {
                minimum_version: "three".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_find_project_config_stops_at_git_root() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("src/renderer");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();

        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }
}
