//! # carbon-tools UI Utilities Module (`common::ui`)
//!
//! File: cli/src/common/ui/mod.rs
//!
//! ## Overview
//!
//! User-facing status lines for the setup workflow. Every step reports with a
//! single coloured line on stdout:
//!
//! - **green** (`progress`): a step is starting or has finished.
//! - **yellow** (`warning`): something is missing but setup continues.
//! - **red** (`failure`): a step failed; setup still continues unless the
//!   failure is the version gate.
//!
//! Colouring goes through the `colored` crate, which honours `NO_COLOR` and
//! `CLICOLOR_FORCE`. Diagnostic detail goes to `tracing`, not here.
//!
use colored::Colorize;

/// Prints a green progress line.
pub fn progress(message: &str) {
    println!("{}", message.green());
}

/// Prints a yellow warning line.
pub fn warning(message: &str) {
    println!("{}", message.yellow());
}

/// Prints a red failure line.
pub fn failure(message: &str) {
    println!("{}", message.red());
}
