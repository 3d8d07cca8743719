//! `buildrules doctor` — toolchain and project diagnostics.

use std::path::Path;

use anyhow::Result;

use buildrules_modules::LinkConfigurationBuilder;
use buildrules_targets::TargetPlatform;
use buildrules_toolchain::FALLBACK_ENV;

use super::resolve::describe_root;
use crate::config::{ProjectConfig, Settings};

/// Print toolchain and project diagnostic information.
///
/// A config file that fails to load is reported, and the toolchain checks
/// continue with default settings.
pub fn run(start_dir: &Path) -> Result<()> {
    println!("=== buildrules doctor ===");
    println!();
    println!("buildrules version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("--- Project ---");
    let settings = match ProjectConfig::find_and_load(start_dir) {
        Ok(Some((config, dir))) => {
            println!("  buildrules.toml: found at {}", dir.display());
            println!("  Project:         {}", config.project.name);
            println!("  Engine version:  {}", config.project.engine_version);
            if let Some(platform) = config.default_platform() {
                println!("  Default platform: {platform}");
            }
            Settings::from_config(Some((config, dir)), start_dir)
        }
        Ok(None) => {
            println!("  buildrules.toml: not found (using defaults)");
            Settings::from_config(None, start_dir)
        }
        Err(e) => {
            println!("  buildrules.toml: error: {e:#} (using defaults)");
            Settings::from_config(None, start_dir)
        }
    };
    println!();

    println!("--- Toolchain ---");
    let locations = &settings.toolchain.locations;
    println!("  Primary:   {}", locations.primary.display());
    match &locations.fallback {
        Some(fallback) => println!("  Fallback:  {}", fallback.display()),
        None => println!("  Fallback:  (not configured; set {FALLBACK_ENV})"),
    }
    println!("  Selection: {:?}", settings.toolchain.version_selection);

    let probe = settings.toolchain.probe();
    println!("  Root:      {}", describe_root(&probe.value.root));
    match &probe.value.sdk {
        Some(sdk) => println!(
            "  ATL:       {} [{}]",
            sdk.path.display(),
            if sdk.exists { "ok" } else { "missing" }
        ),
        None => println!("  ATL:       not resolved"),
    }
    for warning in &probe.warnings {
        println!("  warning:   {warning}");
    }
    println!();

    println!("--- Native archive library ---");
    let builder = LinkConfigurationBuilder::default();
    for platform in TargetPlatform::ALL {
        println!(
            "  {:<12} {}",
            platform.name(),
            if builder.is_supported(platform) {
                "supported"
            } else {
                "unsupported"
            }
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctor_runs_without_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path()).unwrap();
    }

    #[test]
    fn doctor_reports_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::CONFIG_FILE),
            "[project\nname = ",
        )
        .unwrap();
        assert!(ProjectConfig::find_and_load(dir.path()).is_err());
        run(dir.path()).unwrap();
    }

    #[test]
    fn doctor_runs_with_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(crate::config::CONFIG_FILE),
            "[project]\nname = \"doc\"\n",
        )
        .unwrap();
        run(dir.path()).unwrap();
    }
}
