use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::client::{DEFAULT_ENDPOINT, DEFAULT_ICON_BASE_URL};
use crate::error::WeatherError;

/// City shown on a first run, before any search has been persisted.
pub const DEFAULT_CITY: &str = "Bengaluru";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeatherMap API key. Required before any request is attempted.
    pub api_key: Option<String>,

    /// City used when no last-searched city has been persisted yet.
    pub default_city: Option<String>,

    /// Override for the API base URL (mainly useful for testing).
    pub endpoint: Option<String>,

    /// Override for the icon image base URL.
    pub icon_base_url: Option<String>,
}

impl Config {
    /// The configured credential, or `WeatherError::Config` if none is set.
    /// Checked once at startup so a missing key fails before any request.
    pub fn require_api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(WeatherError::Config)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn icon_base_url(&self) -> &str {
        self.icon_base_url.as_deref().unwrap_or(DEFAULT_ICON_BASE_URL)
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "skycast", "skycast")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_api_key_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.require_api_key().unwrap_err();
        assert!(matches!(err, WeatherError::Config));
    }

    #[test]
    fn require_api_key_errors_when_empty() {
        let cfg = Config {
            api_key: Some(String::new()),
            ..Config::default()
        };
        assert!(cfg.require_api_key().is_err());
    }

    #[test]
    fn defaults_apply_when_overrides_absent() {
        let cfg = Config::default();
        assert_eq!(cfg.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.icon_base_url(), DEFAULT_ICON_BASE_URL);
        assert_eq!(cfg.default_city(), DEFAULT_CITY);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            default_city: Some("Paris".into()),
            endpoint: None,
            icon_base_url: None,
        };
        cfg.save_to(&path).expect("save must succeed");

        let loaded = Config::load_from(&path).expect("load must succeed");
        assert_eq!(loaded.api_key.as_deref(), Some("KEY"));
        assert_eq!(loaded.default_city(), "Paris");
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("does-not-exist.toml");
        let cfg = Config::load_from(&path).expect("missing file is not an error");
        assert!(cfg.api_key.is_none());
    }
}
