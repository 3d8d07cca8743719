//! Resolving the versioned SDK directory beneath a toolchain root.
//!
//! The composed path is
//! `<root>/<relative...>/<selected version>/<suffix...>`, which with the
//! default layout is `<root>/VC/Tools/MSVC/<version>/atlmfc`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::fs::{DirectoryLister, FsLister};
use crate::locator::ToolchainRoot;
use crate::resolution::Resolution;
use crate::version::{select_version, VersionSelection};

/// Fixed path segments around the version directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SdkLayout {
    /// Segments from the toolchain root to the directory of versions.
    pub relative: Vec<String>,
    /// Segments appended after the selected version.
    pub suffix: Vec<String>,
}

impl Default for SdkLayout {
    fn default() -> Self {
        Self {
            relative: vec!["VC".into(), "Tools".into(), "MSVC".into()],
            suffix: vec!["atlmfc".into()],
        }
    }
}

/// A composed SDK directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SdkPath {
    /// Full path to the SDK directory.
    pub path: PathBuf,
    /// Name of the version directory that was selected.
    pub version: String,
    /// Whether `path` existed when it was composed.
    pub exists: bool,
}

/// Resolves the SDK path beneath a toolchain root.
#[derive(Debug, Clone)]
pub struct SdkPathResolver<L = FsLister> {
    lister: L,
    layout: SdkLayout,
    selection: VersionSelection,
}

impl SdkPathResolver<FsLister> {
    /// Resolver over the real filesystem.
    pub fn new(layout: SdkLayout, selection: VersionSelection) -> Self {
        Self::with_lister(FsLister, layout, selection)
    }
}

impl<L: DirectoryLister> SdkPathResolver<L> {
    /// Resolver over a custom directory lister.
    pub fn with_lister(lister: L, layout: SdkLayout, selection: VersionSelection) -> Self {
        Self {
            lister,
            layout,
            selection,
        }
    }

    /// The version selection policy in use.
    pub fn selection(&self) -> VersionSelection {
        self.selection
    }

    /// Compose the SDK path beneath `root`.
    ///
    /// Yields `None` with a warning when the root is unresolved or the versions
    /// directory is unreadable or empty. A composed path that does not exist
    /// is still returned, with a warning; callers must check `exists` before
    /// relying on it.
    pub fn resolve(&self, root: &ToolchainRoot) -> Resolution<Option<SdkPath>> {
        let Some(root_path) = root.path() else {
            return Resolution::degraded(
                None,
                ResolveError::MissingToolchainRoot {
                    detail: "toolchain root is unresolved, cannot compose SDK path".into(),
                },
            );
        };

        let mut versions_dir = root_path.to_path_buf();
        versions_dir.extend(&self.layout.relative);
        log::debug!("listing versions in {}", versions_dir.display());

        let entries = match self.lister.subdirectories(&versions_dir) {
            Ok(entries) => entries,
            Err(source) => {
                return Resolution::degraded(
                    None,
                    ResolveError::Io {
                        path: versions_dir,
                        source,
                    },
                )
            }
        };

        let names: Vec<String> = entries
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();

        let Some(version) = select_version(&names, self.selection) else {
            return Resolution::degraded(
                None,
                ResolveError::MissingVersionedSubdirectory { path: versions_dir },
            );
        };
        log::debug!(
            "selected version {version} of {} ({:?})",
            names.len(),
            self.selection
        );

        let mut path = versions_dir.join(version);
        path.extend(&self.layout.suffix);
        let exists = self.lister.is_dir(&path);

        let sdk = SdkPath {
            path,
            version: version.to_string(),
            exists,
        };
        if exists {
            Resolution::clean(Some(sdk))
        } else {
            let warning = ResolveError::MissingArtifactOnDisk {
                path: sdk.path.clone(),
            };
            Resolution::degraded(Some(sdk), warning)
        }
    }

    /// Like [`resolve`](Self::resolve), but any tolerated failure is an error.
    pub fn resolve_strict(&self, root: &ToolchainRoot) -> Result<SdkPath> {
        self.resolve(root)
            .into_result()?
            .ok_or_else(|| ResolveError::MissingToolchainRoot {
                detail: "no SDK path was produced".into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::FakeTree;
    use std::path::Path;

    fn installed(path: &str) -> ToolchainRoot {
        ToolchainRoot::Installed {
            path: PathBuf::from(path),
        }
    }

    fn resolver(tree: FakeTree, selection: VersionSelection) -> SdkPathResolver<FakeTree> {
        SdkPathResolver::with_lister(tree, SdkLayout::default(), selection)
    }

    #[test]
    fn unresolved_root_yields_nothing_and_one_warning() {
        let r = resolver(FakeTree::new(), VersionSelection::Newest).resolve(&ToolchainRoot::Unresolved);
        assert!(r.value.is_none());
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn empty_versions_dir_yields_nothing() {
        let tree = FakeTree::new().dir("/vs/VC/Tools/MSVC", &[]);
        let r = resolver(tree, VersionSelection::Newest).resolve(&installed("/vs"));
        assert!(r.value.is_none());
        assert_eq!(r.warnings.len(), 1);
        assert!(matches!(
            r.warnings[0],
            ResolveError::MissingVersionedSubdirectory { .. }
        ));
    }

    #[test]
    fn missing_versions_dir_is_caught() {
        let r = resolver(FakeTree::new(), VersionSelection::Newest).resolve(&installed("/vs"));
        assert!(r.value.is_none());
        assert!(matches!(r.warnings[0], ResolveError::Io { .. }));
    }

    #[test]
    fn last_listed_selects_last_entry_not_highest() {
        let tree = FakeTree::new().dir("/vs/VC/Tools/MSVC", &["1.0", "2.0", "1.5"]);
        let r = resolver(tree, VersionSelection::LastListed).resolve(&installed("/vs"));
        let sdk = r.value.unwrap();
        assert_eq!(sdk.version, "1.5");
        assert_eq!(sdk.path, Path::new("/vs/VC/Tools/MSVC/1.5/atlmfc"));
    }

    #[test]
    fn newest_selects_highest_version() {
        let tree = FakeTree::new().dir("/vs/VC/Tools/MSVC", &["1.0", "2.0", "1.5"]);
        let r = resolver(tree, VersionSelection::Newest).resolve(&installed("/vs"));
        assert_eq!(r.value.unwrap().version, "2.0");
    }

    #[test]
    fn missing_suffix_dir_is_returned_with_warning() {
        let tree = FakeTree::new().dir("/vs/VC/Tools/MSVC", &["14.29"]);
        let r = resolver(tree, VersionSelection::Newest).resolve(&installed("/vs"));
        assert_eq!(r.warnings.len(), 1);
        assert!(matches!(
            r.warnings[0],
            ResolveError::MissingArtifactOnDisk { .. }
        ));
        let sdk = r.value.unwrap();
        assert!(!sdk.exists);
        assert_eq!(sdk.path, Path::new("/vs/VC/Tools/MSVC/14.29/atlmfc"));
    }

    #[test]
    fn existing_sdk_is_clean() {
        let tree = FakeTree::new()
            .dir("/vs/VC/Tools/MSVC", &["14.29"])
            .dir("/vs/VC/Tools/MSVC/14.29", &["atlmfc"]);
        let r = resolver(tree, VersionSelection::Newest).resolve(&installed("/vs"));
        assert!(r.is_clean());
        assert!(r.value.unwrap().exists);
    }

    #[test]
    fn fallback_root_is_probed() {
        let tree = FakeTree::new()
            .dir("/alt/VC/Tools/MSVC", &["14.16"])
            .dir("/alt/VC/Tools/MSVC/14.16", &["atlmfc"]);
        let root = ToolchainRoot::Fallback {
            path: PathBuf::from("/alt"),
            exists: true,
        };
        let sdk = resolver(tree, VersionSelection::Newest)
            .resolve_strict(&root)
            .unwrap();
        assert_eq!(sdk.version, "14.16");
    }

    #[test]
    fn strict_resolution_surfaces_warning() {
        let err = resolver(FakeTree::new(), VersionSelection::Newest)
            .resolve_strict(&ToolchainRoot::Unresolved)
            .unwrap_err();
        assert!(matches!(err, ResolveError::MissingToolchainRoot { .. }));
    }

    #[test]
    fn custom_layout() {
        let tree = FakeTree::new()
            .dir("/tc/sdk", &["3.1"])
            .dir("/tc/sdk/3.1", &["lib"])
            .dir("/tc/sdk/3.1/lib", &["x64"]);
        let layout = SdkLayout {
            relative: vec!["sdk".into()],
            suffix: vec!["lib".into(), "x64".into()],
        };
        let r = SdkPathResolver::with_lister(tree, layout, VersionSelection::Newest)
            .resolve(&installed("/tc"));
        assert!(r.is_clean());
        assert_eq!(r.value.unwrap().path, Path::new("/tc/sdk/3.1/lib/x64"));
    }

    #[test]
    fn end_to_end_on_real_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let msvc = dir.path().join("VC").join("Tools").join("MSVC");
        std::fs::create_dir_all(msvc.join("14.16").join("atlmfc")).unwrap();
        std::fs::create_dir_all(msvc.join("14.29").join("atlmfc")).unwrap();

        let root = ToolchainRoot::Installed {
            path: dir.path().to_path_buf(),
        };
        let r = SdkPathResolver::new(SdkLayout::default(), VersionSelection::Newest).resolve(&root);
        assert!(r.is_clean());
        let sdk = r.value.unwrap();
        assert_eq!(sdk.version, "14.29");
        assert_eq!(sdk.path, msvc.join("14.29").join("atlmfc"));
    }
}
