//! Engine release versions.
//!
//! Module declarations gate some dependencies on the engine release they are
//! compiled against (`UE_4_26_OR_LATER`, `UE_5_3_OR_LATER`). Engine versions
//! are `major.minor` and are not semver, so they get their own small type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TargetError;

/// A `major.minor` engine release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EngineVersion {
    /// Major release (4, 5, ...).
    pub major: u32,
    /// Minor release.
    pub minor: u32,
}

impl EngineVersion {
    /// Construct a version from its parts.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// True when this version is `major.minor` or later.
    pub fn at_least(&self, major: u32, minor: u32) -> bool {
        *self >= EngineVersion::new(major, minor)
    }
}

impl Default for EngineVersion {
    fn default() -> Self {
        EngineVersion::new(5, 3)
    }
}

impl fmt::Display for EngineVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for EngineVersion {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |detail: &str| TargetError::InvalidEngineVersion {
            input: s.to_string(),
            detail: detail.to_string(),
        };

        // Accept "5.3" and "5.3.2"; the patch level never affects rules.
        let mut parts = s.trim().split('.');
        let major = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| invalid("missing major version"))?
            .parse::<u32>()
            .map_err(|_| invalid("major version is not a number"))?;
        let minor = match parts.next() {
            Some(p) => p
                .parse::<u32>()
                .map_err(|_| invalid("minor version is not a number"))?,
            None => 0,
        };
        if let Some(patch) = parts.next() {
            patch
                .parse::<u32>()
                .map_err(|_| invalid("patch version is not a number"))?;
        }
        if parts.next().is_some() {
            return Err(invalid("too many components"));
        }
        Ok(EngineVersion::new(major, minor))
    }
}

impl TryFrom<String> for EngineVersion {
    type Error = TargetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EngineVersion> for String {
    fn from(value: EngineVersion) -> Self {
        value.to_string()
    }
}
