//! The project's module declarations.

use serde::Serialize;

use buildrules_targets::BuildSettingsVersion;
use buildrules_toolchain::Resolution;

use crate::context::{BuildContext, ModuleContext};
use crate::error::{ModuleError, Result};
use crate::link::PlatformLinkPlan;
use crate::rules::{CppStandard, IncludeOrderVersion, IwyuSupport, ModuleRules, PchUsage};
use crate::zip_utility;

/// A module's rules for one configuration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeclaredModule {
    /// The module's build declaration.
    pub rules: ModuleRules,
    /// Present for modules that wrap a native library.
    pub link_plan: Option<PlatformLinkPlan>,
}

impl DeclaredModule {
    fn plain(rules: ModuleRules) -> Resolution<Self> {
        Resolution::clean(Self {
            rules,
            link_plan: None,
        })
    }
}

/// A catalog entry.
#[derive(Clone, Copy)]
pub struct ModuleEntry {
    /// Module name.
    pub name: &'static str,
    /// Owning plugin, or `None` for game modules.
    pub plugin: Option<&'static str>,
    /// Module directory relative to the project root.
    pub relative_dir: &'static str,
    declare: fn(&ModuleContext<'_>) -> Resolution<DeclaredModule>,
}

impl ModuleEntry {
    /// Declare this module for `build`.
    pub fn declare(&self, build: &BuildContext) -> Resolution<DeclaredModule> {
        log::debug!("declaring module {} for {}", self.name, build.platform);
        (self.declare)(&build.module(self.relative_dir))
    }
}

static MODULES: [ModuleEntry; 5] = [
    ModuleEntry {
        name: zip_utility::NAME,
        plugin: Some("UnrealBucket"),
        relative_dir: zip_utility::MODULE_DIR,
        declare: zip_utility::declare,
    },
    ModuleEntry {
        name: "UnrealBucket",
        plugin: Some("UnrealBucket"),
        relative_dir: "Plugins/UnrealBucket/Source/UnrealBucket",
        declare: unreal_bucket,
    },
    ModuleEntry {
        name: "GMCCore",
        plugin: Some("GMC"),
        relative_dir: "Plugins/GMC/Source/GMCCore",
        declare: gmc_core,
    },
    ModuleEntry {
        name: "TerminalBallistics",
        plugin: Some("TerminalBallistics"),
        relative_dir: "Plugins/TerminalBallistics/Source/TerminalBallistics",
        declare: terminal_ballistics,
    },
    ModuleEntry {
        name: "TerminalBallisticsEditor",
        plugin: Some("TerminalBallistics"),
        relative_dir: "Plugins/TerminalBallistics/Source/TerminalBallisticsEditor",
        declare: terminal_ballistics_editor,
    },
];

/// All catalog entries, in declaration order.
pub fn builtin_modules() -> &'static [ModuleEntry] {
    &MODULES
}

/// Look up a catalog entry by name.
pub fn find(name: &str) -> Result<&'static ModuleEntry> {
    MODULES
        .iter()
        .find(|m| m.name == name)
        .ok_or_else(|| ModuleError::UnknownModule {
            name: name.to_string(),
        })
}

/// Declare one module by name.
pub fn declare(name: &str, build: &BuildContext) -> Result<Resolution<DeclaredModule>> {
    Ok(find(name)?.declare(build))
}

/// Declare every module, collecting all warnings.
pub fn declare_all(build: &BuildContext) -> Resolution<Vec<DeclaredModule>> {
    let mut all = Resolution::clean(Vec::with_capacity(MODULES.len()));
    for entry in &MODULES {
        let declared = entry.declare(build);
        all.warnings.extend(declared.warnings);
        all.value.push(declared.value);
    }
    all
}

fn unreal_bucket(ctx: &ModuleContext<'_>) -> Resolution<DeclaredModule> {
    let engine = ctx.engine_version();
    let rules = ModuleRules::new("UnrealBucket")
        .pch(PchUsage::UseExplicitOrSharedPchs, None)
        .public_deps(["Core", zip_utility::NAME])
        .private_deps([
            "AssetRegistry",
            "Blutility",
            "CoreUObject",
            "Engine",
            "InputCore",
            "LevelEditor",
            "ContentBrowser",
            "Projects",
            "Slate",
            "SlateCore",
            "UMG",
            "UMGEditor",
            "UnrealEd",
            "HTTP",
            "Json",
            "JsonUtilities",
            "ApplicationCore",
            "EditorStyle",
            "PropertyEditor",
        ])
        .private_deps_if(engine.at_least(4, 26), ["DeveloperSettings"])
        .private_deps_if(engine.at_least(5, 3), ["ScriptableEditorWidgets"]);
    DeclaredModule::plain(ModuleRules {
        use_precompiled: false,
        ..rules
    })
}

fn gmc_core(ctx: &ModuleContext<'_>) -> Resolution<DeclaredModule> {
    let public_dirs = ["", "Actors", "Components", "Replication", "Utility", "Widgets"];
    let private_dirs = [
        "",
        "Actors",
        "Components",
        "Debug",
        "Replication",
        "Utility",
        "Widgets",
    ];
    let under = |root: &str, sub: &str| {
        if sub.is_empty() {
            ctx.path(root)
        } else {
            ctx.path(&format!("{root}/{sub}"))
        }
    };

    let rules = ModuleRules::new("GMCCore")
        .pch(PchUsage::UseExplicitOrSharedPchs, Some("Private/GMCCore.pch"))
        .public_deps([
            "Core",
            "CoreUObject",
            "Engine",
            "InputCore",
            "NetCore",
            "PhysicsCore",
            "SlateCore",
            "AnimGraphRuntime",
            "AIModule",
            "UMG",
            "EnhancedInput",
            "GameplayTags",
        ])
        .public_includes(public_dirs.iter().map(|d| under("Public", *d)))
        .private_includes(private_dirs.iter().map(|d| under("Private", *d)));

    // Logging macros depend on definition order, which unity builds break.
    DeclaredModule::plain(ModuleRules {
        min_source_files_for_unity_build: Some(i32::MAX),
        ..rules
    })
}

fn ballistics_base(ctx: &ModuleContext<'_>, name: &str) -> ModuleRules {
    let rules = ModuleRules::new(name)
        .pch(PchUsage::UseExplicitOrSharedPchs, None)
        .public_includes([ctx.path("Public")])
        .private_includes([ctx.path("Private")]);
    ModuleRules {
        default_build_settings: Some(BuildSettingsVersion::Latest),
        cpp_standard: Some(CppStandard::Cpp20),
        include_order: Some(IncludeOrderVersion::Latest),
        iwyu: Some(IwyuSupport::Full),
        ..rules
    }
}

fn terminal_ballistics(ctx: &ModuleContext<'_>) -> Resolution<DeclaredModule> {
    DeclaredModule::plain(ballistics_base(ctx, "TerminalBallistics").public_deps([
        "Core",
        "CoreUObject",
        "Engine",
        "PhysicsCore",
        "Niagara",
        "GameplayTags",
        "DeveloperSettings",
        "NetCore",
    ]))
}

fn terminal_ballistics_editor(ctx: &ModuleContext<'_>) -> Resolution<DeclaredModule> {
    DeclaredModule::plain(
        ballistics_base(ctx, "TerminalBallisticsEditor")
            .public_deps(["Core", "CoreUObject", "Engine", "UnrealEd"]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildrules_targets::{EngineVersion, TargetPlatform};
    use std::path::Path;

    fn linux_build() -> BuildContext {
        BuildContext::new("/proj", TargetPlatform::Linux)
    }

    #[test]
    fn catalog_names_are_unique() {
        let mut names: Vec<_> = builtin_modules().iter().map(|m| m.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), builtin_modules().len());
    }

    #[test]
    fn unknown_module_is_error() {
        assert!(matches!(
            declare("Nope", &linux_build()),
            Err(ModuleError::UnknownModule { .. })
        ));
    }

    #[test]
    fn unreal_bucket_engine_conditionals() {
        let mut build = linux_build();

        build.engine_version = EngineVersion::new(4, 25);
        let old = declare("UnrealBucket", &build).unwrap().value.rules;
        assert!(!old.private_dependency_module_names.contains(&"DeveloperSettings".to_string()));

        build.engine_version = EngineVersion::new(5, 1);
        let mid = declare("UnrealBucket", &build).unwrap().value.rules;
        assert!(mid.private_dependency_module_names.contains(&"DeveloperSettings".to_string()));
        assert!(!mid
            .private_dependency_module_names
            .contains(&"ScriptableEditorWidgets".to_string()));

        build.engine_version = EngineVersion::new(5, 3);
        let new = declare("UnrealBucket", &build).unwrap().value.rules;
        assert!(new
            .private_dependency_module_names
            .contains(&"ScriptableEditorWidgets".to_string()));
        assert_eq!(new.public_dependency_module_names, vec!["Core", "ZipUtility"]);
    }

    #[test]
    fn gmc_core_layout() {
        let rules = declare("GMCCore", &linux_build()).unwrap().value.rules;
        assert_eq!(rules.public_include_paths.len(), 6);
        assert_eq!(rules.private_include_paths.len(), 7);
        assert_eq!(
            rules.public_include_paths[0],
            Path::new("/proj/Plugins/GMC/Source/GMCCore/Public")
        );
        assert!(rules
            .private_include_paths
            .contains(&Path::new("/proj/Plugins/GMC/Source/GMCCore/Private/Debug").to_path_buf()));
        assert_eq!(rules.min_source_files_for_unity_build, Some(i32::MAX));
        assert_eq!(rules.public_dependency_module_names.len(), 12);
    }

    #[test]
    fn ballistics_settings() {
        let rules = declare("TerminalBallisticsEditor", &linux_build())
            .unwrap()
            .value
            .rules;
        assert_eq!(rules.cpp_standard, Some(CppStandard::Cpp20));
        assert_eq!(rules.iwyu, Some(IwyuSupport::Full));
        assert_eq!(rules.default_build_settings, Some(BuildSettingsVersion::Latest));
        assert!(rules
            .public_dependency_module_names
            .contains(&"UnrealEd".to_string()));
    }

    #[test]
    fn declare_all_on_linux_is_clean() {
        let all = declare_all(&linux_build());
        assert!(all.is_clean());
        assert_eq!(all.value.len(), builtin_modules().len());
        let with_plans = all.value.iter().filter(|m| m.link_plan.is_some()).count();
        assert_eq!(with_plans, 1);
    }
}
