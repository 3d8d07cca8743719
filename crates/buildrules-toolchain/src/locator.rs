//! Locating the installed compiler toolchain root.
//!
//! The primary install directory holds one subdirectory per product edition
//! (`Community`, `Professional`, ...); the first one listed becomes the root.
//! When the primary directory is absent, the operator-configured fallback is
//! returned as-is, whether or not it exists.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ResolveError;
use crate::fs::{DirectoryLister, FsLister};
use crate::resolution::Resolution;

/// Default primary install directory.
pub const DEFAULT_PRIMARY: &str = r"C:\Program Files\Microsoft Visual Studio\2022";

/// Environment variable that overrides the configured fallback root
/// (for example `E:\Microsoft Visual Studio\2022`).
pub const FALLBACK_ENV: &str = "BUILDRULES_TOOLCHAIN_FALLBACK";

/// Where to look for a toolchain install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SearchLocations {
    /// Directory whose first subdirectory is the toolchain root.
    pub primary: PathBuf,
    /// Root to use when `primary` is absent. Never verified before use.
    /// An empty value means no fallback.
    #[serde(deserialize_with = "non_empty_path")]
    pub fallback: Option<PathBuf>,
}

fn non_empty_path<'de, D>(deserializer: D) -> Result<Option<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Option::<PathBuf>::deserialize(deserializer)?;
    Ok(path.filter(|p| !p.as_os_str().is_empty()))
}

impl Default for SearchLocations {
    fn default() -> Self {
        Self {
            primary: PathBuf::from(DEFAULT_PRIMARY),
            fallback: None,
        }
    }
}

impl SearchLocations {
    /// Replace the fallback with a non-empty override value.
    pub fn with_fallback_override(mut self, value: Option<OsString>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.fallback = Some(PathBuf::from(value));
        }
        self
    }

    /// Apply the [`FALLBACK_ENV`] override from the process environment.
    pub fn with_env_fallback(self) -> Self {
        self.with_fallback_override(std::env::var_os(FALLBACK_ENV))
    }
}

/// Outcome of toolchain location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ToolchainRoot {
    /// Found under the primary install directory; verified to exist.
    Installed { path: PathBuf },
    /// The configured fallback. `exists` records whether it was there.
    Fallback { path: PathBuf, exists: bool },
    /// Nothing usable.
    Unresolved,
}

impl ToolchainRoot {
    /// The root path, if any was produced.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ToolchainRoot::Installed { path } | ToolchainRoot::Fallback { path, .. } => {
                Some(path.as_path())
            }
            ToolchainRoot::Unresolved => None,
        }
    }

    /// True unless this is [`ToolchainRoot::Unresolved`].
    pub fn is_resolved(&self) -> bool {
        !matches!(self, ToolchainRoot::Unresolved)
    }
}

/// Finds the toolchain root.
#[derive(Debug, Clone)]
pub struct ToolchainLocator<L = FsLister> {
    lister: L,
    locations: SearchLocations,
}

impl ToolchainLocator<FsLister> {
    /// Locator over the real filesystem.
    pub fn new(locations: SearchLocations) -> Self {
        Self::with_lister(FsLister, locations)
    }
}

impl<L: DirectoryLister> ToolchainLocator<L> {
    /// Locator over a custom directory lister.
    pub fn with_lister(lister: L, locations: SearchLocations) -> Self {
        Self { lister, locations }
    }

    /// Search locations in use.
    pub fn locations(&self) -> &SearchLocations {
        &self.locations
    }

    /// Locate the toolchain root. Performs a single scan and never fails hard.
    pub fn locate(&self) -> Resolution<ToolchainRoot> {
        let primary = &self.locations.primary;
        log::debug!("probing toolchain install at {}", primary.display());

        if self.lister.is_dir(primary) {
            return self.locate_in_primary(primary);
        }

        let fallback = self
            .locations
            .fallback
            .as_ref()
            .filter(|p| !p.as_os_str().is_empty());
        match fallback {
            Some(fallback) => {
                let exists = self.lister.is_dir(fallback);
                log::debug!(
                    "primary install absent, using fallback {} (exists: {exists})",
                    fallback.display()
                );
                let root = ToolchainRoot::Fallback {
                    path: fallback.clone(),
                    exists,
                };
                if exists {
                    Resolution::clean(root)
                } else {
                    Resolution::degraded(
                        root,
                        ResolveError::MissingToolchainRoot {
                            detail: format!(
                                "{} is absent and fallback {} does not exist",
                                primary.display(),
                                fallback.display()
                            ),
                        },
                    )
                }
            }
            None => Resolution::degraded(
                ToolchainRoot::Unresolved,
                ResolveError::MissingToolchainRoot {
                    detail: format!(
                        "{} is absent and no fallback is configured (set {FALLBACK_ENV})",
                        primary.display()
                    ),
                },
            ),
        }
    }

    fn locate_in_primary(&self, primary: &Path) -> Resolution<ToolchainRoot> {
        let editions = match self.lister.subdirectories(primary) {
            Ok(editions) => editions,
            Err(source) => {
                return Resolution::degraded(
                    ToolchainRoot::Unresolved,
                    ResolveError::Io {
                        path: primary.to_path_buf(),
                        source,
                    },
                )
            }
        };

        // First entry in enumeration order; installs normally carry one edition.
        match editions.into_iter().next() {
            Some(edition) => {
                let path = match edition.file_name() {
                    Some(name) => primary.join(name),
                    None => edition,
                };
                log::debug!("toolchain root: {}", path.display());
                Resolution::clean(ToolchainRoot::Installed { path })
            }
            None => Resolution::degraded(
                ToolchainRoot::Unresolved,
                ResolveError::MissingToolchainRoot {
                    detail: format!("{} contains no edition directories", primary.display()),
                },
            ),
        }
    }
}
