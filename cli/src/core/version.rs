//! # carbon-tools Version Handling
//!
//! File: cli/src/core/version.rs
//!
//! Minimal `MAJOR.MINOR.PATCH` parsing used by the setup workflow's version
//! gate and by configuration validation. Pre-release and build suffixes
//! (`-rc1`, `+abc`) are ignored for ordering.
//!
use crate::core::error::{CarbonError, Result};
use std::fmt;
use std::str::FromStr;

/// A three-component release version. Ordering is lexicographic over
/// (major, minor, patch), which the derive provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Version of the running carbon-tools binary.
    pub fn current() -> Self {
        // CARGO_PKG_VERSION is always a valid semver triple.
        env!("CARGO_PKG_VERSION")
            .parse()
            .unwrap_or(Version {
                major: 0,
                minor: 0,
                patch: 0,
            })
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let core = trimmed.split(&['-', '+'][..]).next().unwrap_or_default();
        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(CarbonError::InvalidVersion(s.to_string()).into());
        }
        let mut numbers = [0u64; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| CarbonError::InvalidVersion(s.to_string()))?;
        }
        Ok(Version {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
