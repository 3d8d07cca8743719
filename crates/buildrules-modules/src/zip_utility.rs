//! The archive utility module: wraps the bundled 7-Zip C++ library.
//!
//! On the supported platform this is the only module that probes the
//! compiler toolchain, because the bundled library links against ATL and needs
//! ATL's headers from the installed toolchain.

use std::path::PathBuf;

use buildrules_toolchain::Resolution;

use crate::catalog::DeclaredModule;
use crate::context::ModuleContext;
use crate::link::{LinkConfigurationBuilder, LinkInputs};
use crate::rules::{ModuleRules, PchUsage};

/// Module name.
pub const NAME: &str = "ZipUtility";

/// Module directory relative to the project root.
pub const MODULE_DIR: &str = "Plugins/UnrealBucket/Source/ZipUtility";

/// Root of the bundled 7zpp SDK for this module.
pub fn seven_zpp_dir(ctx: &ModuleContext<'_>) -> PathBuf {
    ctx.third_party_dir().join("7zpp")
}

/// Declare the module's rules and native link plan.
///
/// The toolchain is only probed when the platform supports the native
/// library. Probe failures degrade to a plan without the ATL include and are
/// returned as warnings.
pub fn declare(ctx: &ModuleContext<'_>) -> Resolution<DeclaredModule> {
    let rules = ModuleRules::new(NAME)
        .pch(
            PchUsage::UseExplicitOrSharedPchs,
            Some("Private/ZipUtilityPrivatePCH.h"),
        )
        .public_includes([ctx.path("Public")])
        .private_includes([ctx.path("Private")])
        .public_deps(["Core", "WindowsFileUtility"])
        .private_deps(["CoreUObject", "Engine", "Slate", "SlateCore", "Projects"]);
    let rules = ModuleRules {
        use_precompiled: false,
        ..rules
    };

    let builder = LinkConfigurationBuilder::default();
    let platform = ctx.platform();
    let atl = if builder.is_supported(platform) {
        ctx.build
            .toolchain
            .probe()
            .map(|probe| probe.sdk.map(|sdk| sdk.path))
    } else {
        log::info!("{NAME}: native archive library unavailable on {platform}");
        Resolution::clean(None)
    };

    atl.map(|atl_root| {
        let inputs = LinkInputs::new(seven_zpp_dir(ctx)).with_atl(atl_root);
        let plan = builder.build(platform, &inputs);
        let mut rules = rules;
        rules.apply_link_plan(&plan);
        DeclaredModule {
            rules,
            link_plan: Some(plan),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BuildContext;
    use buildrules_targets::TargetPlatform;
    use buildrules_toolchain::{SearchLocations, ToolchainSettings};
    use std::fs;
    use std::path::Path;

    fn toolchain_tree(dir: &Path) -> ToolchainSettings {
        let primary = dir.join("vs").join("2022");
        let msvc = primary.join("Community").join("VC").join("Tools").join("MSVC");
        fs::create_dir_all(msvc.join("14.16").join("atlmfc")).unwrap();
        fs::create_dir_all(msvc.join("14.29").join("atlmfc")).unwrap();
        ToolchainSettings {
            locations: SearchLocations {
                primary,
                fallback: None,
            },
            ..Default::default()
        }
    }

    #[test]
    fn win64_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut build = BuildContext::new(dir.path().join("proj"), TargetPlatform::Win64);
        build.toolchain = toolchain_tree(dir.path());

        let ctx = build.module(MODULE_DIR);
        let declared = declare(&ctx);
        assert!(declared.is_clean());

        let sdk = dir
            .path()
            .join("proj/Plugins/UnrealBucket/Source/ThirdParty/7zpp");
        let plan = declared.value.link_plan.unwrap();
        assert!(plan.supported);
        assert_eq!(
            plan.static_libraries,
            vec![
                sdk.join("Lib").join("Win64").join("atls.lib"),
                sdk.join("Lib").join("Win64").join("7zpp_u.lib"),
            ]
        );
        assert_eq!(
            plan.runtime_dependencies[0].source,
            sdk.join("dll").join("Win64").join("7z.dll")
        );
        assert_eq!(plan.delay_load.as_deref(), Some("7z.dll"));

        let atl_include = dir
            .path()
            .join("vs/2022/Community/VC/Tools/MSVC/14.29/atlmfc/include");
        let rules = declared.value.rules;
        assert!(rules.private_include_paths.contains(&atl_include));
        assert!(rules.private_include_paths.contains(&sdk.join("Include")));
        assert_eq!(rules.public_additional_libraries.len(), 2);
        assert!(!rules.use_precompiled);
    }

    #[test]
    fn win64_without_toolchain_still_plans_libraries() {
        let dir = tempfile::tempdir().unwrap();
        let mut build = BuildContext::new(dir.path().join("proj"), TargetPlatform::Win64);
        build.toolchain.locations = SearchLocations {
            primary: dir.path().join("missing"),
            fallback: None,
        };

        let declared = declare(&build.module(MODULE_DIR));
        assert!(!declared.is_clean());
        let plan = declared.value.link_plan.unwrap();
        assert!(plan.supported);
        assert_eq!(plan.static_libraries.len(), 2);
        // Only the bundled SDK headers; no ATL include without a toolchain.
        assert_eq!(plan.private_include_dirs.len(), 1);
    }

    #[test]
    fn linux_skips_native_library_and_probe() {
        let dir = tempfile::tempdir().unwrap();
        let build = BuildContext::new(dir.path(), TargetPlatform::Linux);
        let declared = declare(&build.module(MODULE_DIR));
        assert!(declared.is_clean());
        let plan = declared.value.link_plan.unwrap();
        assert!(!plan.supported);
        assert!(plan.is_empty());
        let rules = declared.value.rules;
        assert!(rules.public_additional_libraries.is_empty());
        assert_eq!(
            rules.public_dependency_module_names,
            vec!["Core", "WindowsFileUtility"]
        );
        assert_eq!(
            rules.private_pch_header.as_deref(),
            Some("Private/ZipUtilityPrivatePCH.h")
        );
    }
}
