//! # carbon-tools Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure shared by both commands:
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `version`: `MAJOR.MINOR.PATCH` parsing for the setup version gate
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{CarbonError, Result}; // For error handling
//! use crate::core::version::Version; // For version comparisons
//! ```
//!
pub mod config;
pub mod error;
pub mod version;
