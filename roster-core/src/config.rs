//! roster configuration.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::client::{Client, DEFAULT_BASE_URL};
use crate::error::{RosterError, RosterResult};

static DEFAULT_EXPORT_DIR: &str = ".";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

/// Configuration at ~/.config/roster/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RosterConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Directory `participants.xlsx` is written to.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            export_dir: default_export_dir(),
        }
    }
}

impl RosterConfig {
    pub fn config_path() -> RosterResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| RosterError::Config("Could not determine config directory".into()))?
            .join("roster");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, writing a commented default on first use.
    pub fn load() -> RosterResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> RosterResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| RosterError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| RosterError::Config(e.to_string()))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> RosterResult<()> {
        let contents = format!(
            "\
# roster configuration

# Event backend:
# base_url = \"{DEFAULT_BASE_URL}\"

# Where participants.xlsx is saved:
# export_dir = \"{DEFAULT_EXPORT_DIR}\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RosterError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| RosterError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Export directory with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.export_dir.to_string_lossy()).into_owned())
    }

    pub fn client(&self) -> Client {
        Client::new(self.base_url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = RosterConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, RosterConfig::default());
        assert_eq!(config.base_url, "https://sxv-backend.onrender.com");
    }

    #[test]
    fn test_default_file_is_all_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        RosterConfig::create_default_config(&path).unwrap();
        let config = RosterConfig::load_from(&path).unwrap();

        assert_eq!(config, RosterConfig::default());
    }

    #[test]
    fn test_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "base_url = \"http://localhost:4000/\"\nexport_dir = \"~/exports\"\n",
        )
        .unwrap();

        let config = RosterConfig::load_from(&path).unwrap();

        assert_eq!(config.client().base_url(), "http://localhost:4000");
        assert!(!config.export_path().to_string_lossy().starts_with('~'));
        assert!(config.export_path().ends_with("exports"));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "base_url = [1, 2").unwrap();

        assert!(matches!(
            RosterConfig::load_from(&path),
            Err(RosterError::Config(_))
        ));
    }
}
