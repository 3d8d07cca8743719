//! Combined locate-then-resolve configuration.

use serde::{Deserialize, Serialize};

use crate::fs::{DirectoryLister, FsLister};
use crate::locator::{SearchLocations, ToolchainLocator, ToolchainRoot};
use crate::resolution::Resolution;
use crate::resolver::{SdkLayout, SdkPath, SdkPathResolver};
use crate::version::VersionSelection;

/// Everything needed to go from nothing to an SDK path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainSettings {
    /// Install directories to search.
    #[serde(flatten)]
    pub locations: SearchLocations,
    /// Segments around the version directory.
    #[serde(flatten)]
    pub layout: SdkLayout,
    /// Version directory selection policy.
    #[serde(default)]
    pub version_selection: VersionSelection,
}

/// Result of a full probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainProbe {
    /// The located root.
    pub root: ToolchainRoot,
    /// The composed SDK path, if one could be produced.
    pub sdk: Option<SdkPath>,
}

impl ToolchainSettings {
    /// Locate the toolchain and resolve the SDK on the real filesystem.
    pub fn probe(&self) -> Resolution<ToolchainProbe> {
        self.probe_with(FsLister)
    }

    /// Locate and resolve through a custom directory lister.
    pub fn probe_with<L: DirectoryLister>(&self, lister: L) -> Resolution<ToolchainProbe> {
        let locator = ToolchainLocator::with_lister(&lister, self.locations.clone());
        let resolver =
            SdkPathResolver::with_lister(&lister, self.layout.clone(), self.version_selection);
        locator
            .locate()
            .and_then(|root| resolver.resolve(root))
            .map(|(root, sdk)| ToolchainProbe { root, sdk })
    }
}
