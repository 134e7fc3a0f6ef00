//! Project schema version
//!
//! A project file declares its schema as a `_version` string (`"3.0.0"`)
//! plus a `_release` counter (`"2"`). Together they form a totally ordered
//! tag, written compactly as `300r2`.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Ordered schema version tag (`major.minor.patch` + release)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaVersion {
    major: u32,
    minor: u32,
    patch: u32,
    release: u32,
}

impl SchemaVersion {
    pub const fn new(major: u32, minor: u32, patch: u32, release: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            release,
        }
    }

    /// Parse the `_version` / `_release` pair stored in a project file.
    ///
    /// A missing release counts as release `1`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Parse` if the version is not three dot-separated
    /// integers or the release is not an integer.
    pub fn parse(version: &str, release: Option<&str>) -> Result<Self, DomainError> {
        let parts = version
            .trim()
            .split('.')
            .map(|part| {
                part.parse::<u32>().map_err(|_| {
                    DomainError::parse(format!(
                        "Invalid version component '{}' in '{}'",
                        part, version
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let [major, minor, patch] = parts[..] else {
            return Err(DomainError::parse(format!(
                "Expected MAJOR.MINOR.PATCH version, got '{}'",
                version
            )));
        };

        let release = match release.map(str::trim) {
            None | Some("") => 1,
            Some(release) => release.parse::<u32>().map_err(|_| {
                DomainError::parse(format!("Invalid release number '{}'", release))
            })?,
        };

        Ok(Self::new(major, minor, patch, release))
    }

    /// The `_version` string, e.g. `"3.1.0"`
    pub fn version_string(&self) -> String {
        format!("{}.{}.{}", self.major, self.minor, self.patch)
    }

    /// The `_release` string, e.g. `"1"`
    pub fn release_string(&self) -> String {
        self.release.to_string()
    }

    /// Compact tag, e.g. `310r1`
    pub fn tag(&self) -> String {
        format!("{}{}{}r{}", self.major, self.minor, self.patch, self.release)
    }
}

impl Ord for SchemaVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch, self.release).cmp(&(
            other.major,
            other.minor,
            other.patch,
            other.release,
        ))
    }
}

impl PartialOrd for SchemaVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
