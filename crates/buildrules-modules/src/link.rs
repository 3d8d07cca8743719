//! Per-platform native library link planning.
//!
//! A prebuilt native library is supported on exactly one platform. For that
//! platform the plan registers its static libraries, a delay-loaded shared
//! library, and a runtime copy of that shared library next to the built
//! binaries. Every other platform gets an empty plan, and the caller can skip
//! whatever depends on the library.
//!
//! No library file is checked for existence here. A missing file surfaces
//! later as a link error from the orchestrator.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use buildrules_targets::TargetPlatform;

/// Placeholder the orchestrator expands to the binaries output directory.
pub const BINARY_OUTPUT_DIR: &str = "$(BinaryOutputDir)";

/// A file copied next to the built binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeDependency {
    /// Where the file lives in the source tree.
    pub source: PathBuf,
    /// Where it is staged in the build output.
    pub deployed: PathBuf,
}

/// Layout of a prebuilt native library SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NativeLibrary {
    /// The single platform the prebuilt binaries exist for.
    pub platform: TargetPlatform,
    /// Header directory, relative to the SDK root.
    pub include_dir: String,
    /// Static library directory, relative to the SDK root.
    pub lib_dir: String,
    /// Shared library directory, relative to the SDK root.
    pub dll_dir: String,
    /// Static libraries to link, in link order.
    pub static_libraries: Vec<String>,
    /// Shared library loaded on first use.
    pub shared_library: String,
}

impl NativeLibrary {
    /// The bundled 7-Zip C++ wrapper (`7zpp`) and its ATL dependency.
    pub fn seven_zpp() -> Self {
        Self {
            platform: TargetPlatform::Win64,
            include_dir: "Include".into(),
            lib_dir: "Lib".into(),
            dll_dir: "dll".into(),
            static_libraries: vec!["atls.lib".into(), "7zpp_u.lib".into()],
            shared_library: "7z.dll".into(),
        }
    }
}

/// Directories the link plan is composed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkInputs {
    /// Root of the bundled SDK (headers, `Lib/`, `dll/`).
    pub sdk_root: PathBuf,
    /// Resolved ATL directory from the toolchain, if any.
    pub atl_root: Option<PathBuf>,
}

impl LinkInputs {
    /// Inputs with no toolchain ATL directory.
    pub fn new(sdk_root: impl Into<PathBuf>) -> Self {
        Self {
            sdk_root: sdk_root.into(),
            atl_root: None,
        }
    }

    /// Attach a resolved ATL directory.
    pub fn with_atl(mut self, atl_root: Option<PathBuf>) -> Self {
        self.atl_root = atl_root;
        self
    }
}

/// What a module contributes to the link for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlatformLinkPlan {
    /// Platform the plan was built for.
    pub platform: TargetPlatform,
    /// Whether the native library is available on this platform.
    pub supported: bool,
    /// Include directories exported to dependents.
    pub public_include_dirs: Vec<PathBuf>,
    /// Include directories for the module itself.
    pub private_include_dirs: Vec<PathBuf>,
    /// Static library files to link.
    pub static_libraries: Vec<PathBuf>,
    /// Shared library whose load is deferred to first use.
    pub delay_load: Option<String>,
    /// Files copied next to the built binaries.
    pub runtime_dependencies: Vec<RuntimeDependency>,
}

impl PlatformLinkPlan {
    /// The plan for a platform without native support.
    pub fn unsupported(platform: TargetPlatform) -> Self {
        Self {
            platform,
            supported: false,
            public_include_dirs: Vec::new(),
            private_include_dirs: Vec::new(),
            static_libraries: Vec::new(),
            delay_load: None,
            runtime_dependencies: Vec::new(),
        }
    }

    /// True when the plan contributes nothing.
    pub fn is_empty(&self) -> bool {
        self.public_include_dirs.is_empty()
            && self.private_include_dirs.is_empty()
            && self.static_libraries.is_empty()
            && self.delay_load.is_none()
            && self.runtime_dependencies.is_empty()
    }
}

/// Builds [`PlatformLinkPlan`]s for one native library.
#[derive(Debug, Clone)]
pub struct LinkConfigurationBuilder {
    library: NativeLibrary,
}

impl LinkConfigurationBuilder {
    /// Builder for `library`.
    pub fn new(library: NativeLibrary) -> Self {
        Self { library }
    }

    /// The library this builder plans for.
    pub fn library(&self) -> &NativeLibrary {
        &self.library
    }

    /// Whether `platform` is the one the library supports.
    pub fn is_supported(&self, platform: TargetPlatform) -> bool {
        platform == self.library.platform
    }

    /// Build the plan for `platform`.
    ///
    /// A supported plan always has one entry per configured static library and
    /// exactly one delay-load, whether or not `inputs` point anywhere real.
    pub fn build(&self, platform: TargetPlatform, inputs: &LinkInputs) -> PlatformLinkPlan {
        if !self.is_supported(platform) {
            log::debug!(
                "{} not supported on {platform}, emitting empty link plan",
                self.library.shared_library
            );
            return PlatformLinkPlan::unsupported(platform);
        }

        let lib = &self.library;
        let sub_path = platform.windows_sub_path();
        let sdk = inputs.sdk_root.as_path();
        let libraries_dir = sdk.join(&lib.lib_dir).join(sub_path);
        let dll_dir = sdk.join(&lib.dll_dir).join(sub_path);

        let mut private_include_dirs = vec![sdk.join(&lib.include_dir)];
        if let Some(atl) = &inputs.atl_root {
            private_include_dirs.push(atl.join("include"));
        }

        PlatformLinkPlan {
            platform,
            supported: true,
            public_include_dirs: Vec::new(),
            private_include_dirs,
            static_libraries: lib
                .static_libraries
                .iter()
                .map(|name| libraries_dir.join(name))
                .collect(),
            delay_load: Some(lib.shared_library.clone()),
            runtime_dependencies: vec![RuntimeDependency {
                source: dll_dir.join(&lib.shared_library),
                deployed: Path::new(BINARY_OUTPUT_DIR).join(&lib.shared_library),
            }],
        }
    }
}

impl Default for LinkConfigurationBuilder {
    fn default() -> Self {
        Self::new(NativeLibrary::seven_zpp())
    }
}
