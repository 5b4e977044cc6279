//! # carbon-tools Archive Utilities Module (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//!
//! ## Overview
//!
//! Archive handling for downloaded external dependencies. Third-party
//! libraries are distributed as platform-specific `.zip` releases, so the
//! only submodule today is:
//!
//! - **`zip`**: extraction of `.zip` archives into a destination directory.
//!

pub mod zip;
