//! `buildrules.toml` parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use buildrules_modules::BuildContext;
use buildrules_targets::{EngineVersion, TargetPlatform};
use buildrules_toolchain::ToolchainSettings;

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "buildrules.toml";

/// The top-level configuration for a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata (required).
    pub project: ProjectSection,
    /// Toolchain search settings.
    #[serde(default)]
    pub toolchain: ToolchainSettings,
    /// Platform defaults.
    #[serde(default)]
    pub targets: Option<TargetsSection>,
}

/// Project metadata section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectSection {
    /// Project name (required).
    pub name: String,
    /// Engine release the modules are built against.
    #[serde(default)]
    pub engine_version: EngineVersion,
}

/// Targets section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetsSection {
    /// Platform used when `--platform` is not given.
    #[serde(default)]
    pub default_platform: Option<TargetPlatform>,
}

impl ProjectConfig {
    /// Search upward from `start_dir` for `buildrules.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config: ProjectConfig = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                log::debug!("loaded {}", candidate.display());
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse a configuration from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing buildrules.toml")
    }

    /// The configured default platform, if any.
    pub fn default_platform(&self) -> Option<TargetPlatform> {
        self.targets.as_ref().and_then(|t| t.default_platform)
    }

    /// Generate the default template for `buildrules init`.
    pub fn template(name: &str, engine_version: EngineVersion) -> String {
        format!(
            r#"[project]
name = "{name}"
engine-version = "{engine_version}"

[toolchain]
primary = 'C:\Program Files\Microsoft Visual Studio\2022'
# Used when the primary install is absent, e.g. 'E:\Microsoft Visual Studio\2022'.
# BUILDRULES_TOOLCHAIN_FALLBACK overrides this.
# fallback = ''
version-selection = "newest"

[targets]
default-platform = "win64"
"#
        )
    }
}

/// Configuration after applying environment overrides, ready for use.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding `buildrules.toml`, or the start directory.
    pub project_root: PathBuf,
    /// Engine release being built against.
    pub engine_version: EngineVersion,
    /// Platform used when none is given on the command line.
    pub default_platform: Option<TargetPlatform>,
    /// Toolchain search settings with the environment override applied.
    pub toolchain: ToolchainSettings,
}

impl Settings {
    /// Build settings from an optional loaded config, falling back to defaults
    /// rooted at `cwd`.
    pub fn from_config(loaded: Option<(ProjectConfig, PathBuf)>, cwd: &Path) -> Self {
        let settings = match loaded {
            Some((config, root)) => Settings {
                project_root: root,
                engine_version: config.project.engine_version,
                default_platform: config.default_platform(),
                toolchain: config.toolchain,
            },
            None => Settings {
                project_root: cwd.to_path_buf(),
                engine_version: EngineVersion::default(),
                default_platform: None,
                toolchain: ToolchainSettings::default(),
            },
        };
        settings.with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        self.toolchain.locations = self.toolchain.locations.with_env_fallback();
        self
    }

    /// Pick the platform from an explicit argument, the config default, or Win64.
    pub fn platform(&self, explicit: Option<&str>) -> Result<TargetPlatform> {
        match explicit {
            Some(name) => Ok(name.parse()?),
            None => Ok(self.default_platform.unwrap_or(TargetPlatform::Win64)),
        }
    }

    /// Build context for a configuration pass on `platform`.
    pub fn build_context(&self, platform: TargetPlatform) -> BuildContext {
        BuildContext {
            project_root: self.project_root.clone(),
            platform,
            engine_version: self.engine_version,
            toolchain: self.toolchain.clone(),
        }
    }
}
