//! Declarative module rules.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use buildrules_targets::BuildSettingsVersion;

use crate::link::{PlatformLinkPlan, RuntimeDependency};

/// Precompiled header strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PchUsage {
    /// Engine default.
    #[default]
    Default,
    /// Shared PCHs unless a private PCH header is named.
    UseExplicitOrSharedPchs,
    /// Always use the shared PCHs.
    UseSharedPchs,
    /// No precompiled headers.
    NoPchs,
}

/// C++ language standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CppStandard {
    Cpp17,
    Cpp20,
    Latest,
}

/// Engine header include order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IncludeOrderVersion {
    Oldest,
    Latest,
}

/// Include-what-you-use enforcement level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IwyuSupport {
    Disabled,
    KeepAsIs,
    Full,
}

/// Build declaration for one module.
///
/// Dependency module names are opaque to this crate and pass through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleRules {
    /// Module name, as dependents refer to it.
    pub name: String,
    /// Precompiled header mode.
    pub pch_usage: PchUsage,
    /// Explicit private PCH header, relative to the module directory.
    pub private_pch_header: Option<String>,
    /// Whether the orchestrator may use precompiled binaries for this module.
    pub use_precompiled: bool,
    /// Build settings baseline, when pinned.
    pub default_build_settings: Option<BuildSettingsVersion>,
    /// C++ language standard override.
    pub cpp_standard: Option<CppStandard>,
    /// Engine include order version override.
    pub include_order: Option<IncludeOrderVersion>,
    /// Include-what-you-use level override.
    pub iwyu: Option<IwyuSupport>,
    /// Minimum source file count before unity builds kick in.
    pub min_source_files_for_unity_build: Option<i32>,
    /// Include paths exported to dependents.
    pub public_include_paths: Vec<PathBuf>,
    /// Include paths used only by this module.
    pub private_include_paths: Vec<PathBuf>,
    /// Modules whose headers appear in this module's public headers.
    pub public_dependency_module_names: Vec<String>,
    /// Modules used only by this module's implementation.
    pub private_dependency_module_names: Vec<String>,
    /// Modules loaded at runtime rather than linked.
    pub dynamically_loaded_module_names: Vec<String>,
    /// Preprocessor definitions exported to dependents.
    pub public_definitions: Vec<String>,
    /// Static libraries linked into dependents.
    pub public_additional_libraries: Vec<PathBuf>,
    /// Shared libraries loaded on first use.
    pub public_delay_load_dlls: Vec<String>,
    /// Files copied next to the built binaries.
    pub runtime_dependencies: Vec<RuntimeDependency>,
}

fn push_unique<T: PartialEq>(list: &mut Vec<T>, items: impl IntoIterator<Item = T>) {
    for item in items {
        if !list.contains(&item) {
            list.push(item);
        }
    }
}

impl ModuleRules {
    /// Empty rules for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pch_usage: PchUsage::Default,
            private_pch_header: None,
            use_precompiled: true,
            default_build_settings: None,
            cpp_standard: None,
            include_order: None,
            iwyu: None,
            min_source_files_for_unity_build: None,
            public_include_paths: Vec::new(),
            private_include_paths: Vec::new(),
            public_dependency_module_names: Vec::new(),
            private_dependency_module_names: Vec::new(),
            dynamically_loaded_module_names: Vec::new(),
            public_definitions: Vec::new(),
            public_additional_libraries: Vec::new(),
            public_delay_load_dlls: Vec::new(),
            runtime_dependencies: Vec::new(),
        }
    }

    /// Set the PCH strategy and, optionally, a private PCH header.
    pub fn pch(mut self, usage: PchUsage, private_header: Option<&str>) -> Self {
        self.pch_usage = usage;
        self.private_pch_header = private_header.map(str::to_string);
        self
    }

    pub fn public_includes<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        push_unique(&mut self.public_include_paths, paths.into_iter().map(Into::into));
        self
    }

    pub fn private_includes<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        push_unique(&mut self.private_include_paths, paths.into_iter().map(Into::into));
        self
    }

    pub fn public_deps<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(
            &mut self.public_dependency_module_names,
            names.into_iter().map(Into::into),
        );
        self
    }

    pub fn private_deps<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        push_unique(
            &mut self.private_dependency_module_names,
            names.into_iter().map(Into::into),
        );
        self
    }

    /// Add private dependencies only when `condition` holds.
    pub fn private_deps_if<I, S>(self, condition: bool, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if condition {
            self.private_deps(names)
        } else {
            self
        }
    }

    /// Merge a native link plan into these rules. Empty plans change nothing.
    pub fn apply_link_plan(&mut self, plan: &PlatformLinkPlan) {
        push_unique(
            &mut self.public_include_paths,
            plan.public_include_dirs.iter().cloned(),
        );
        push_unique(
            &mut self.private_include_paths,
            plan.private_include_dirs.iter().cloned(),
        );
        push_unique(
            &mut self.public_additional_libraries,
            plan.static_libraries.iter().cloned(),
        );
        push_unique(&mut self.public_delay_load_dlls, plan.delay_load.iter().cloned());
        push_unique(
            &mut self.runtime_dependencies,
            plan.runtime_dependencies.iter().cloned(),
        );
    }

    /// Every dependency module name, public first.
    pub fn all_dependencies(&self) -> impl Iterator<Item = &str> {
        self.public_dependency_module_names
            .iter()
            .chain(&self.private_dependency_module_names)
            .map(String::as_str)
    }
}
