//! `buildrules module` — module listing and description.

use anyhow::Result;

use buildrules_modules::{builtin_modules, DeclaredModule, ModuleRules};

use super::{warning_summary, OutputFormat};
use crate::config::Settings;

/// List all modules in the catalog.
pub fn list() -> Result<()> {
    println!("Modules:");
    println!();
    for entry in builtin_modules() {
        println!(
            "  {:<26} {:<20} {}",
            entry.name,
            entry.plugin.unwrap_or("-"),
            entry.relative_dir
        );
    }
    println!();
    println!("Use 'buildrules module describe <name>' for details.");
    Ok(())
}

fn list_block(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("{title}:\n"));
    for item in items {
        out.push_str(&format!("  {item}\n"));
    }
}

/// Render module rules as text.
pub(crate) fn render_text(rules: &ModuleRules) -> String {
    let paths = |v: &[std::path::PathBuf]| -> Vec<String> {
        v.iter().map(|p| p.display().to_string()).collect()
    };

    let mut out = format!("=== Module: {} ===\n", rules.name);
    out.push_str(&format!("PCH usage:        {:?}\n", rules.pch_usage));
    if let Some(header) = &rules.private_pch_header {
        out.push_str(&format!("Private PCH:      {header}\n"));
    }
    out.push_str(&format!("Use precompiled:  {}\n", rules.use_precompiled));
    if let Some(settings) = rules.default_build_settings {
        out.push_str(&format!("Build settings:   {settings:?}\n"));
    }
    if let Some(std) = rules.cpp_standard {
        out.push_str(&format!("C++ standard:     {std:?}\n"));
    }
    if let Some(min) = rules.min_source_files_for_unity_build {
        out.push_str(&format!("Unity min files:  {min}\n"));
    }
    list_block(&mut out, "Public dependencies", &rules.public_dependency_module_names);
    list_block(&mut out, "Private dependencies", &rules.private_dependency_module_names);
    list_block(&mut out, "Public includes", &paths(rules.public_include_paths.as_slice()));
    list_block(&mut out, "Private includes", &paths(rules.private_include_paths.as_slice()));
    list_block(
        &mut out,
        "Additional libraries",
        &paths(rules.public_additional_libraries.as_slice()),
    );
    list_block(&mut out, "Delay-load DLLs", &rules.public_delay_load_dlls);
    out
}

/// Describe one module as declared for the chosen platform.
pub fn describe(
    settings: &Settings,
    name: &str,
    platform: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let platform = settings.platform(platform)?;
    let build = settings.build_context(platform);
    let declared = buildrules_modules::declare(name, &build)?;

    match format {
        OutputFormat::Json => {
            let value: &DeclaredModule = &declared.value;
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        OutputFormat::Text => {
            print!("{}", render_text(&declared.value.rules));
            if let Some(plan) = &declared.value.link_plan {
                println!(
                    "Native library:   {}",
                    if plan.supported { "linked" } else { "unsupported on this platform" }
                );
            }
        }
    }
    if let Some(summary) = warning_summary(&declared.warnings) {
        eprintln!("warning: {summary}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn list_runs() {
        list().unwrap();
    }

    #[test]
    fn describe_known_module() {
        let settings = Settings::from_config(None, Path::new("/proj"));
        describe(&settings, "UnrealBucket", Some("linux"), OutputFormat::Text).unwrap();
        describe(&settings, "GMCCore", Some("mac"), OutputFormat::Json).unwrap();
    }

    #[test]
    fn describe_unknown_module() {
        let settings = Settings::from_config(None, Path::new("/proj"));
        assert!(describe(&settings, "Nope", None, OutputFormat::Text).is_err());
    }

    #[test]
    fn text_lists_dependencies() {
        let rules = ModuleRules::new("M").public_deps(["Core"]).private_deps(["Slate"]);
        let text = render_text(&rules);
        assert!(text.contains("Public dependencies:\n  Core"));
        assert!(text.contains("Private dependencies:\n  Slate"));
        assert!(!text.contains("Delay-load"));
    }
}
