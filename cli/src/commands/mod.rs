//! # carbon-tools Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the top-level commands of the carbon-tools CLI. Each command
//! module defines its own `Args` struct (parsed by Clap in `main.rs`) and an
//! async `handle_*` function.
//!
//! ## Commands
//!
//! - `format`: run clang-format / cmake-format over sources and build files
//! - `setup`: provision a fresh checkout so it can be built
//!

/// Source and build-file formatting. Exits with the formatter's status on the first failure.
pub mod format;
/// One-shot project provisioning: build dirs, hooks, submodules, dependencies and CMake.
pub mod setup;
