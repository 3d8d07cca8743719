//! Per-executable target rules.
//!
//! A target names the kind of binary being produced and the primary modules
//! it compiles. The project ships one game target and one editor target.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TargetError};

/// Kind of binary a target produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetType {
    /// Standalone game executable.
    Game,
    /// Editor build that loads the game modules.
    Editor,
    /// Dedicated server.
    Server,
    /// Client-only build.
    Client,
    /// Standalone tool.
    Program,
}

/// Default build settings revision a target or module opts into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuildSettingsVersion {
    /// Settings revision 2.
    V2,
    /// Settings revision 4.
    V4,
    /// Whatever the current engine considers latest.
    Latest,
}

/// Build settings for one executable target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetRules {
    /// Target name (e.g. "ProjectOlympusAlpha").
    pub name: String,
    /// Binary kind.
    #[serde(rename = "type")]
    pub target_type: TargetType,
    /// Build settings revision.
    pub default_build_settings: BuildSettingsVersion,
    /// Primary modules compiled into the target.
    pub extra_module_names: Vec<String>,
}

impl TargetRules {
    /// Create target rules with no extra modules.
    pub fn new(
        name: impl Into<String>,
        target_type: TargetType,
        default_build_settings: BuildSettingsVersion,
    ) -> Self {
        Self {
            name: name.into(),
            target_type,
            default_build_settings,
            extra_module_names: Vec::new(),
        }
    }

    /// Append extra module names, keeping order and skipping duplicates.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for module in modules {
            let module = module.into();
            if !self.extra_module_names.contains(&module) {
                self.extra_module_names.push(module);
            }
        }
        self
    }

    /// The shipping game target.
    pub fn project_olympus_alpha() -> Self {
        TargetRules::new("ProjectOlympusAlpha", TargetType::Game, BuildSettingsVersion::V4)
            .with_modules(["ProjectOlympusAlpha"])
    }

    /// The editor target.
    pub fn project_olympus_alpha_editor() -> Self {
        TargetRules::new(
            "ProjectOlympusAlphaEditor",
            TargetType::Editor,
            BuildSettingsVersion::V4,
        )
        .with_modules(["ProjectOlympusAlpha"])
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// All built-in targets as `(name, description)` pairs.
pub fn builtin_targets() -> Vec<(&'static str, &'static str)> {
    vec![
        ("ProjectOlympusAlpha", "Game executable"),
        ("ProjectOlympusAlphaEditor", "Editor build of the game modules"),
    ]
}

/// Look up a built-in target by name.
pub fn resolve_target(name: &str) -> Result<TargetRules> {
    match name {
        "ProjectOlympusAlpha" => Ok(TargetRules::project_olympus_alpha()),
        "ProjectOlympusAlphaEditor" => Ok(TargetRules::project_olympus_alpha_editor()),
        _ => Err(TargetError::UnknownTarget {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_target() {
        let t = TargetRules::project_olympus_alpha();
        assert_eq!(t.target_type, TargetType::Game);
        assert_eq!(t.default_build_settings, BuildSettingsVersion::V4);
        assert_eq!(t.extra_module_names, vec!["ProjectOlympusAlpha".to_string()]);
    }

    #[test]
    fn editor_target() {
        let t = TargetRules::project_olympus_alpha_editor();
        assert_eq!(t.name, "ProjectOlympusAlphaEditor");
        assert_eq!(t.target_type, TargetType::Editor);
        assert_eq!(t.extra_module_names, vec!["ProjectOlympusAlpha".to_string()]);
    }

    #[test]
    fn with_modules_skips_duplicates() {
        let t = TargetRules::new("T", TargetType::Program, BuildSettingsVersion::Latest)
            .with_modules(["A", "B", "A"]);
        assert_eq!(t.extra_module_names, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn every_builtin_resolves() {
        for (name, _) in builtin_targets() {
            let t = resolve_target(name).unwrap();
            assert_eq!(t.name, name);
        }
    }

    #[test]
    fn unknown_target_is_error() {
        assert!(matches!(
            resolve_target("Nope"),
            Err(TargetError::UnknownTarget { .. })
        ));
    }

    #[test]
    fn toml_output_names_type() {
        let toml_str = TargetRules::project_olympus_alpha_editor().to_toml().unwrap();
        assert!(toml_str.contains("type = \"editor\""));
        assert!(toml_str.contains("default-build-settings = \"v4\""));
    }
}
