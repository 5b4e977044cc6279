//! # carbon-tools Setup Command
//!
//! File: cli/src/commands/setup/mod.rs
//!
//! ## Overview
//!
//! `carbon-tools setup` prepares a freshly cloned project for building:
//! build directories, git hooks, submodules, prebuilt external libraries,
//! vcpkg packages and the CMake configuration of `build/debug` and
//! `build/release`.
//!
//! ## Architecture
//!
//! - `external`: table of prebuilt archives and their download/extract logic.
//! - `workflow`: the `Provisioner`, which runs the steps in order.
//!
//! This handler only gathers the host facts (platform, working directory,
//! `VCPKG_ROOT`, configuration) and wires the real tool locator, process
//! runner and HTTP client into the `Provisioner`.
//!
//! ## Examples
//!
//! ```bash
//! # From the project root
//! carbon-tools setup
//!
//! # With step-by-step logging
//! carbon-tools -vv setup
//! ```
//!
use crate::common::network::HttpFetcher;
use crate::common::process::SystemRunner;
use crate::common::system::{PathLocator, Platform};
use crate::core::config;
use crate::core::error::Result;
use crate::core::version::Version;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

mod external;
mod workflow;

use workflow::{Provisioner, PACKAGE_ROOT_VAR};

/// Arguments for `carbon-tools setup`. The command takes no options.
#[derive(Parser, Debug, Default)]
#[command(
    about = "Prepare the project for building",
    long_about = "Creates build/debug and build/release, installs git hooks, updates submodules,\n\
                  downloads prebuilt external libraries, installs vcpkg packages and runs CMake\n\
                  in both build directories. Run it from the project root."
)]
pub struct SetupArgs {}

/// Main handler for `carbon-tools setup`.
pub async fn handle_setup(_args: SetupArgs) -> Result<()> {
    info!("Handling setup command...");
    let config = config::load_config()?;
    let platform = Platform::detect()?;
    let root = std::env::current_dir()?;
    let package_root = std::env::var_os(PACKAGE_ROOT_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let fetcher = HttpFetcher::new();

    Provisioner {
        root: &root,
        platform,
        config: &config.setup,
        current_version: Version::current(),
        package_root,
        locator: &PathLocator,
        runner: &SystemRunner,
        fetcher: &fetcher,
    }
    .run()
    .await
}
