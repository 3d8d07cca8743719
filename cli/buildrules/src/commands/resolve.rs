//! `buildrules resolve` — locate the toolchain and resolve the SDK path.

use anyhow::{bail, Result};
use serde::Serialize;

use buildrules_toolchain::{Resolution, ToolchainProbe, ToolchainRoot};

use super::{warning_strings, warning_summary, OutputFormat};
use crate::config::Settings;

#[derive(Serialize)]
struct ProbeReport<'a> {
    #[serde(flatten)]
    probe: &'a ToolchainProbe,
    warnings: Vec<String>,
}

/// Describe a toolchain root in one line.
pub(crate) fn describe_root(root: &ToolchainRoot) -> String {
    match root {
        ToolchainRoot::Installed { path } => format!("{} (installed)", path.display()),
        ToolchainRoot::Fallback { path, exists } => format!(
            "{} (fallback{})",
            path.display(),
            if *exists { "" } else { ", missing" }
        ),
        ToolchainRoot::Unresolved => "unresolved".to_string(),
    }
}

/// Render a probe result.
pub(crate) fn render(probe: &Resolution<ToolchainProbe>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&ProbeReport {
            probe: &probe.value,
            warnings: warning_strings(&probe.warnings),
        })?),
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("Toolchain root: {}\n", describe_root(&probe.value.root)));
            match &probe.value.sdk {
                Some(sdk) => out.push_str(&format!(
                    "SDK path:       {} (version {}{})\n",
                    sdk.path.display(),
                    sdk.version,
                    if sdk.exists { "" } else { ", missing" }
                )),
                None => out.push_str("SDK path:       (none)\n"),
            }
            if let Some(summary) = warning_summary(&probe.warnings) {
                out.push_str(&format!("Status:         degraded ({summary})\n"));
            } else {
                out.push_str("Status:         ok\n");
            }
            Ok(out)
        }
    }
}

/// Run the toolchain probe and print the result.
///
/// With `strict`, any tolerated failure turns into a non-zero exit.
pub fn run(settings: &Settings, strict: bool, format: OutputFormat) -> Result<()> {
    let probe = settings.toolchain.probe();
    print!("{}", render(&probe, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    if strict {
        if let Err(e) = probe.into_result() {
            bail!("toolchain resolution degraded: {e}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildrules_toolchain::{SearchLocations, ToolchainSettings};
    use std::path::Path;

    fn settings_at(dir: &Path) -> Settings {
        let mut settings = Settings::from_config(None, dir);
        settings.toolchain = ToolchainSettings {
            locations: SearchLocations {
                primary: dir.join("vs"),
                fallback: None,
            },
            ..Default::default()
        };
        settings
    }

    #[test]
    fn missing_toolchain_is_lenient_by_default() {
        let dir = tempfile::tempdir().unwrap();
        run(&settings_at(dir.path()), false, OutputFormat::Text).unwrap();
    }

    #[test]
    fn missing_toolchain_fails_in_strict_mode() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(&settings_at(dir.path()), true, OutputFormat::Text).is_err());
    }

    #[test]
    fn strict_succeeds_with_complete_install() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(
            dir.path()
                .join("vs/Community/VC/Tools/MSVC/14.29.30133/atlmfc"),
        )
        .unwrap();
        run(&settings_at(dir.path()), true, OutputFormat::Json).unwrap();
    }

    #[test]
    fn text_render_reports_degraded() {
        let dir = tempfile::tempdir().unwrap();
        let probe = settings_at(dir.path()).toolchain.probe();
        let text = render(&probe, OutputFormat::Text).unwrap();
        assert!(text.contains("Toolchain root: unresolved"));
        assert!(text.contains("degraded (2 warnings"));
    }

    #[test]
    fn json_render_includes_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let probe = settings_at(dir.path()).toolchain.probe();
        let json: serde_json::Value =
            serde_json::from_str(&render(&probe, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["root"]["kind"], "unresolved");
        assert_eq!(json["warnings"].as_array().unwrap().len(), 2);
    }
}
