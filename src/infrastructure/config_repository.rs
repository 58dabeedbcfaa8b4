use crate::domain::entities::{FusionHome, OrchestratorSettings};
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

const SETTINGS_FILE: &str = "fusion-services.json";

pub struct ConfigRepository {
    config_path: PathBuf,
    required: bool,
}

impl ConfigRepository {
    /// Optional settings kept next to `fusion.properties`.
    pub fn for_home(home: &FusionHome) -> Self {
        Self {
            config_path: home.root().join("conf").join(SETTINGS_FILE),
            required: false,
        }
    }

    /// A settings file named explicitly; it must exist.
    pub fn explicit(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            required: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn load(&self) -> Result<OrchestratorSettings> {
        if !self.config_path.exists() {
            if self.required {
                bail!("Settings file {} does not exist", self.config_path.display());
            }
            return Ok(OrchestratorSettings::default());
        }

        let content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read settings file {}", self.config_path.display()))?;

        let settings = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", self.config_path.display()))?;

        tracing::debug!(path = %self.config_path.display(), "Loaded settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optional_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ConfigRepository::for_home(&FusionHome::new(dir.path()));
        assert_eq!(repo.load().unwrap(), OrchestratorSettings::default());
    }

    #[test]
    fn absent_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = ConfigRepository::explicit(dir.path().join("missing.json"));
        assert!(repo.load().is_err());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("conf")).unwrap();
        fs::write(
            dir.path().join("conf").join(SETTINGS_FILE),
            r#"{ "start_secs": 90, "status_runner": "/opt/agent" }"#,
        )
        .unwrap();

        let settings = ConfigRepository::for_home(&FusionHome::new(dir.path()))
            .load()
            .unwrap();
        assert_eq!(settings.start_secs, 90);
        assert_eq!(settings.status_runner, "/opt/agent");
        assert_eq!(settings.stop_secs, 600);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "start_seconds": 90 }"#).unwrap();

        let err = ConfigRepository::explicit(&path).load().unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
