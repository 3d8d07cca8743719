//! Selection among version-named directories.
//!
//! Toolchains install one directory per compiler version (`14.16.27023`,
//! `14.29.30133`, ...). Two selection policies are supported:
//!
//! - [`VersionSelection::LastListed`] takes whatever entry the directory
//!   enumeration returns last. No version parsing happens, so the result
//!   depends on filesystem ordering.
//! - [`VersionSelection::Newest`] parses names as versions and takes the
//!   highest, ordering unparseable names lexically below every parsed one.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A parsed version.
pub type Version = semver::Version;

/// How to choose one entry from a list of version directories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSelection {
    /// Last entry in enumeration order.
    LastListed,
    /// Highest semantic version, lexical order for names that do not parse.
    #[default]
    Newest,
}

/// Parse a toolchain directory name such as `14.29.30133` or `14.16`.
///
/// Missing minor/patch components are treated as zero and a leading `v` is
/// ignored. Anything that is not one to three dot-separated integers is
/// rejected.
pub fn parse_toolchain_version(name: &str) -> Option<Version> {
    let trimmed = name.strip_prefix('v').unwrap_or(name);
    let parts: Vec<&str> = trimmed.split('.').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }
    let mut numbers = [0u64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    Some(Version::new(numbers[0], numbers[1], numbers[2]))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    match (parse_toolchain_version(a), parse_toolchain_version(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}

/// Pick one name from `names` according to `policy`.
///
/// Returns `None` only when `names` is empty.
pub fn select_version<S: AsRef<str>>(names: &[S], policy: VersionSelection) -> Option<&str> {
    match policy {
        VersionSelection::LastListed => names.last().map(AsRef::as_ref),
        VersionSelection::Newest => names
            .iter()
            .map(AsRef::as_ref)
            .max_by(|a, b| compare_names(a, b)),
    }
}
