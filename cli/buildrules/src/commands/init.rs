//! `buildrules init` — write a starter configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use buildrules_targets::EngineVersion;

use crate::config::{ProjectConfig, CONFIG_FILE};

/// Write `buildrules.toml` into `project_dir`.
pub fn run(project_dir: &Path, name: &str, engine_version: EngineVersion) -> Result<()> {
    let path = project_dir.join(CONFIG_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::create_dir_all(project_dir)
        .with_context(|| format!("creating {}", project_dir.display()))?;
    fs::write(&path, ProjectConfig::template(name, engine_version))
        .with_context(|| format!("writing {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), "ProjectOlympusAlpha", EngineVersion::new(5, 3)).unwrap();

        let (config, found) = ProjectConfig::find_and_load(dir.path()).unwrap().unwrap();
        assert_eq!(found, dir.path());
        assert_eq!(config.project.name, "ProjectOlympusAlpha");
        assert_eq!(config.project.engine_version, EngineVersion::new(5, 3));
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), "first", EngineVersion::default()).unwrap();
        assert!(run(dir.path(), "second", EngineVersion::default()).is_err());
    }

    #[test]
    fn init_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("new-project");
        run(&nested, "new", EngineVersion::default()).unwrap();
        assert!(nested.join(CONFIG_FILE).is_file());
    }
}
