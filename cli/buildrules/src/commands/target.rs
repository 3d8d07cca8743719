//! `buildrules target` — target listing and description.

use anyhow::Result;

use buildrules_targets::target_rules::{builtin_targets, resolve_target};

/// List all built-in targets.
pub fn list() -> Result<()> {
    println!("Built-in targets:");
    println!();
    for (name, description) in builtin_targets() {
        println!("  {name:<28} {description}");
    }
    println!();
    println!("Use 'buildrules target describe <name>' for details.");
    Ok(())
}

/// Describe a specific target.
pub fn describe(name: &str, format: Option<&str>) -> Result<()> {
    let target = resolve_target(name)?;

    if format == Some("toml") {
        print!("{}", target.to_toml()?);
        return Ok(());
    }

    println!("=== Target: {} ===", target.name);
    println!("Type:           {:?}", target.target_type);
    println!("Build settings: {:?}", target.default_build_settings);
    println!("Modules:");
    for module in &target.extra_module_names {
        println!("  {module}");
    }
    Ok(())
}
