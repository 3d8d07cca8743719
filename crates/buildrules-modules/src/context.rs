//! Inputs shared by every module declaration in one configuration pass.

use std::path::{Path, PathBuf};

use buildrules_targets::{EngineVersion, TargetPlatform};
use buildrules_toolchain::ToolchainSettings;

/// Project-wide inputs for a configuration pass.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Project root (the directory holding `Source/` and `Plugins/`).
    pub project_root: PathBuf,
    /// Platform being built.
    pub platform: TargetPlatform,
    /// Engine release being built against.
    pub engine_version: EngineVersion,
    /// How to find the compiler toolchain.
    pub toolchain: ToolchainSettings,
}

impl BuildContext {
    /// Context with the default engine version and toolchain settings.
    pub fn new(project_root: impl Into<PathBuf>, platform: TargetPlatform) -> Self {
        Self {
            project_root: project_root.into(),
            platform,
            engine_version: EngineVersion::default(),
            toolchain: ToolchainSettings::default(),
        }
    }

    /// Narrow to one module whose directory is `relative_dir` under the project root.
    pub fn module(&self, relative_dir: &str) -> ModuleContext<'_> {
        let mut module_dir = self.project_root.clone();
        module_dir.extend(relative_dir.split('/'));
        ModuleContext {
            build: self,
            module_dir,
        }
    }
}

/// Inputs for a single module declaration.
#[derive(Debug, Clone)]
pub struct ModuleContext<'a> {
    /// The enclosing configuration pass.
    pub build: &'a BuildContext,
    /// Directory holding the module's sources.
    pub module_dir: PathBuf,
}

impl ModuleContext<'_> {
    /// Platform being built.
    pub fn platform(&self) -> TargetPlatform {
        self.build.platform
    }

    /// Engine release being built against.
    pub fn engine_version(&self) -> EngineVersion {
        self.build.engine_version
    }

    /// `<module_dir>/<relative>`, with `/` separating segments.
    pub fn path(&self, relative: &str) -> PathBuf {
        let mut path = self.module_dir.clone();
        path.extend(relative.split('/'));
        path
    }

    /// The plugin's `Source/ThirdParty` directory, a sibling of the module.
    pub fn third_party_dir(&self) -> PathBuf {
        self.module_dir
            .parent()
            .unwrap_or_else(|| Path::new(".."))
            .join("ThirdParty")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_paths() {
        let build = BuildContext::new("/proj", TargetPlatform::Win64);
        let ctx = build.module("Plugins/UnrealBucket/Source/ZipUtility");
        assert_eq!(
            ctx.module_dir,
            Path::new("/proj/Plugins/UnrealBucket/Source/ZipUtility")
        );
        assert_eq!(
            ctx.path("Public/Actors"),
            Path::new("/proj/Plugins/UnrealBucket/Source/ZipUtility/Public/Actors")
        );
        assert_eq!(
            ctx.third_party_dir(),
            Path::new("/proj/Plugins/UnrealBucket/Source/ThirdParty")
        );
    }

    #[test]
    fn defaults() {
        let build = BuildContext::new("/proj", TargetPlatform::Linux);
        let ctx = build.module("Source/Game");
        assert_eq!(ctx.platform(), TargetPlatform::Linux);
        assert_eq!(ctx.engine_version(), EngineVersion::default());
    }
}
