//! `buildrules plan` — show a module's native link plan for a platform.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::Serialize;

use buildrules_modules::PlatformLinkPlan;

use super::{warning_strings, warning_summary, OutputFormat};
use crate::config::Settings;

#[derive(Serialize)]
struct PlanReport<'a> {
    module: &'a str,
    plan: &'a PlatformLinkPlan,
    warnings: Vec<String>,
}

fn display_all(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|p| p.display().to_string()).collect()
}

fn section(out: &mut String, title: &str, items: Vec<String>) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("{title}:\n"));
    for item in items {
        out.push_str(&format!("  {item}\n"));
    }
}

/// Render a link plan as text.
pub(crate) fn render_text(module: &str, plan: &PlatformLinkPlan) -> String {
    let mut out = format!("=== Link plan: {module} on {} ===\n", plan.platform);
    if !plan.supported {
        out.push_str("Native library not supported on this platform; nothing to link.\n");
        return out;
    }
    section(&mut out, "Public include dirs", display_all(&plan.public_include_dirs));
    section(&mut out, "Private include dirs", display_all(&plan.private_include_dirs));
    section(&mut out, "Static libraries", display_all(&plan.static_libraries));
    section(&mut out, "Delay-load", plan.delay_load.iter().cloned().collect());
    section(
        &mut out,
        "Runtime dependencies",
        plan.runtime_dependencies
            .iter()
            .map(|d| format!("{} -> {}", d.source.display(), d.deployed.display()))
            .collect(),
    );
    out
}

/// Print the link plan of `module` for the chosen platform.
pub fn run(
    settings: &Settings,
    module: &str,
    platform: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let platform = settings.platform(platform)?;
    let build = settings.build_context(platform);
    let declared = buildrules_modules::declare(module, &build)?;
    let plan = declared
        .value
        .link_plan
        .as_ref()
        .ok_or_else(|| anyhow!("module '{module}' does not wrap a native library"))?;

    match format {
        OutputFormat::Json => {
            let report = PlanReport {
                module,
                plan,
                warnings: warning_strings(&declared.warnings),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print!("{}", render_text(module, plan));
            if let Some(summary) = warning_summary(&declared.warnings) {
                eprintln!("warning: plan built from a degraded toolchain probe ({summary})");
            }
        }
    }
    Ok(())
}
