//! # Provisioning Workflow
//!
//! File: cli/src/commands/setup/workflow.rs
//!
//! ## Overview
//!
//! `Provisioner` brings a fresh clone of the project to a buildable state.
//! Steps run strictly in order:
//!
//! 1. Version gate: a tool older than `setup.minimum_version` ends the run
//!    right here, with a red message and a success status.
//! 2. `build/debug` and `build/release` scaffolding.
//! 3. Git hooks via `pre-commit install`.
//! 4. `git submodule update --init --recursive`.
//! 5. External dependency archives (see `external`).
//! 6. `vcpkg install`.
//! 7. CMake configuration of both build directories.
//!
//! Every other step is best-effort: a failure prints a coloured line and the
//! next step runs anyway. External commands go through the `CommandRunner`
//! seam with their output discarded, so only success or failure is visible.
//!
//! ## Platform matrix
//!
//! | Platform | vcpkg                             | CMake                         |
//! |----------|-----------------------------------|-------------------------------|
//! | macOS    | attempted silently, result ignored | `-G Xcode`                    |
//! | Windows  | attempted, failure reported       | default generator, via `cmd`  |
//! | Linux    | attempted, failure reported       | default generator, direct     |
//!
use super::external::{self, Acquisition, EXTERNAL_DEPENDENCIES};
use crate::common::fs::io::ensure_dir_exists;
use crate::common::network::Fetcher;
use crate::common::process::{CommandRunner, Invocation};
use crate::common::system::{Platform, ToolLocator};
use crate::common::ui;
use crate::core::config::SetupConfig;
use crate::core::error::Result;
use crate::core::version::Version;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable pointing at the vcpkg installation.
pub const PACKAGE_ROOT_VAR: &str = "VCPKG_ROOT";

/// Build output variants, each configured in `build/<dir_name>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildVariant {
    Debug,
    Release,
}

impl BuildVariant {
    /// Configuration order: debug first.
    pub const ALL: [BuildVariant; 2] = [BuildVariant::Debug, BuildVariant::Release];

    /// Directory below `build/`, also used in failure messages.
    pub fn dir_name(self) -> &'static str {
        match self {
            BuildVariant::Debug => "debug",
            BuildVariant::Release => "release",
        }
    }
}

/// Builds the CMake invocation for one build directory.
///
/// ## Arguments
///
/// * `platform` - Selects the generator (`Xcode` on macOS) and whether `cmd` wraps the call.
/// * `cmake` - Resolved cmake executable.
/// * `build_dir` - `build/debug` or `build/release`; the source tree is `../..` from there.
///
/// ## Returns
///
/// * `Invocation` - Ready to hand to a `CommandRunner`.
pub fn cmake_invocation(platform: Platform, cmake: &Path, build_dir: &Path) -> Invocation {
    // -Wno-dev: glslang relies on behaviour deprecated since CMake 3.13.
    let args: &[&str] = match platform {
        Platform::MacOs => &["-G", "Xcode", "-Wno-dev", "../.."],
        Platform::Windows | Platform::Linux => &["-Wno-dev", "../.."],
    };
    let shell = match platform {
        Platform::Windows => true,
        Platform::Linux | Platform::MacOs => false,
    };
    Invocation::new(cmake, args.iter().copied())
        .in_dir(build_dir)
        .with_shell(shell)
}

/// Everything one provisioning run needs, passed in explicitly.
pub struct Provisioner<'a, L, R, F> {
    pub root: &'a Path,
    pub platform: Platform,
    pub config: &'a SetupConfig,
    pub current_version: Version,
    /// Value of `VCPKG_ROOT`, if set.
    pub package_root: Option<PathBuf>,
    pub locator: &'a L,
    pub runner: &'a R,
    pub fetcher: &'a F,
}

impl<L, R, F> Provisioner<'_, L, R, F>
where
    L: ToolLocator,
    R: CommandRunner,
    F: Fetcher,
{
    /// Runs every step.
    ///
    /// ## Returns
    ///
    /// * `Ok(())` - When all steps ran, and also when the version gate stopped
    ///   the run early. Step failures are reported on stdout, never returned.
    /// * `Err` - Only when `setup.minimum_version` itself cannot be parsed.
    pub async fn run(&self) -> Result<()> {
        ui::progress("Setting up project...");
        info!("Provisioning {} on {}", self.root.display(), self.platform);

        if !self.check_version()? {
            return Ok(());
        }
        self.scaffold_build_dirs();
        self.install_git_hooks();
        self.sync_submodules();
        self.acquire_external_dependencies().await;
        self.install_packages();
        self.configure_build();

        ui::progress("Finished configuring project files in build/debug/ and build/release/.");
        Ok(())
    }

    /// Returns `false` when the running tool is older than the project requires.
    fn check_version(&self) -> Result<bool> {
        let minimum: Version = self
            .config
            .minimum_version
            .parse()
            .context("setup.minimum_version is not a valid version")?;
        if self.current_version < minimum {
            ui::failure(&format!(
                "carbon-tools {} or later is required to set up this project (running {}).",
                minimum, self.current_version
            ));
            return Ok(false);
        }
        debug!(
            "Version gate passed ({} >= {})",
            self.current_version, minimum
        );
        Ok(true)
    }

    fn build_dir(&self, variant: BuildVariant) -> PathBuf {
        self.root.join("build").join(variant.dir_name())
    }

    fn scaffold_build_dirs(&self) {
        for variant in BuildVariant::ALL {
            if let Err(e) = ensure_dir_exists(&self.build_dir(variant)) {
                ui::failure(&format!("Could not create build directory: {:#}", e));
            }
        }
    }

    fn install_git_hooks(&self) {
        let Some(pre_commit) = self.locator.locate("pre-commit") else {
            ui::warning("pre-commit not found. Git hooks will not be installed.");
            return;
        };
        let install = Invocation::new(pre_commit, ["install"]).in_dir(self.root);
        if !self.runner.run_quiet(&install) {
            ui::warning("The command 'pre-commit install' failed. Git hooks may be missing.");
        }
    }

    fn sync_submodules(&self) {
        ui::progress("Cloning submodules...");
        let update = Invocation::new("git", ["submodule", "update", "--init", "--recursive"])
            .in_dir(self.root);
        let succeeded = self.runner.run_quiet(&update);
        debug!("Submodule update succeeded: {}", succeeded);
    }

    async fn acquire_external_dependencies(&self) {
        let external_root = self.root.join("external");
        for dependency in EXTERNAL_DEPENDENCIES {
            ui::progress(&format!("Downloading {}...", dependency.name));
            let version = dependency.version(self.config);
            let outcome = external::acquire(
                self.fetcher,
                &external_root,
                dependency,
                version,
                self.platform,
            )
            .await;
            match outcome {
                Ok(Acquisition::Installed { files }) => {
                    debug!("{} {}: {} files extracted", dependency.name, version, files)
                }
                Ok(Acquisition::Unsupported { removed_stale }) => {
                    ui::warning(&format!(
                        "{} does not provide {} builds.",
                        dependency.name, self.platform
                    ));
                    if removed_stale {
                        ui::warning(&format!(
                            "Removed external/{}/ left over from another platform.",
                            dependency.name
                        ));
                    }
                }
                Err(e) => ui::failure(&format!(
                    "Failed to download {}: {:#}",
                    dependency.name, e
                )),
            }
        }
    }

    fn install_packages(&self) {
        match &self.package_root {
            Some(root) => debug!("{} = {}", PACKAGE_ROOT_VAR, root.display()),
            None => ui::warning(&format!(
                "{} is not defined as an environment variable. This may lead to missing dependencies.",
                PACKAGE_ROOT_VAR
            )),
        }

        match self.platform {
            // Packages may come from elsewhere (e.g. Homebrew) on macOS, so
            // vcpkg is tried without any console output.
            Platform::MacOs => {
                let install = Invocation::new("vcpkg", ["install"]).in_dir(self.root);
                let succeeded = self.runner.run_quiet(&install);
                debug!("vcpkg install succeeded: {}", succeeded);
            }
            Platform::Windows | Platform::Linux => {
                ui::progress("Installing dependencies through vcpkg...");
                match self.locator.locate("vcpkg") {
                    Some(vcpkg) => {
                        let install = Invocation::new(vcpkg, ["install"]).in_dir(self.root);
                        if !self.runner.run_quiet(&install) {
                            ui::failure("The command 'vcpkg install' failed.");
                        }
                    }
                    None => ui::warning(
                        "vcpkg is not installed. This may lead to missing dependencies.",
                    ),
                }
            }
        }
    }

    fn configure_build(&self) {
        let Some(cmake) = self.locator.locate("cmake") else {
            ui::failure("cmake is not installed. The project cannot be built.");
            return;
        };
        ui::progress("Configuring build files...");
        for variant in BuildVariant::ALL {
            let invocation = cmake_invocation(self.platform, &cmake, &self.build_dir(variant));
            if !self.runner.run_quiet(&invocation) {
                ui::failure(&format!(
                    "Configuring the {} build failed. Run '{}' in build/{} for details.",
                    variant.dir_name(),
                    invocation.command_line(),
                    variant.dir_name()
                ));
            }
        }
    }
}
