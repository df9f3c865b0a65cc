use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}, time::Duration};

use crate::{code::Variation, resolver::IconRequest};

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// asset_base_url = "http://localhost:5173"
/// default_variation = "line"
/// enable_animation = true
/// prefer_gif = false
/// fetch_timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin serving the icon assets, used for preloading.
    pub asset_base_url: Option<String>,

    pub default_variation: Variation,

    pub enable_animation: bool,

    pub prefer_gif: bool,

    /// Per-asset timeout for preloading. Unset means wait indefinitely.
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asset_base_url: None,
            default_variation: Variation::Fill,
            enable_animation: true,
            prefer_gif: true,
            fetch_timeout_secs: None,
        }
    }
}

impl Config {
    /// Return the asset origin, or a hint on how to configure it.
    pub fn asset_base_url(&self) -> Result<&str> {
        self.asset_base_url.as_deref().ok_or_else(|| {
            anyhow!(
                "No asset base URL configured.\n\
                 Hint: run `weather-icons configure --base-url <url>` or pass `--base-url`."
            )
        })
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Apply configured preferences to a request.
    pub fn apply(&self, request: IconRequest) -> IconRequest {
        request
            .variation(self.default_variation)
            .enable_animation(self.enable_animation)
            .prefer_gif(self.prefer_gif)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
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
        self.save_to(&Self::config_file_path()?)
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
        let dirs = ProjectDirs::from("dev", "weather-icons", "weather-icons")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{ConditionCode, TimeOfDay};

    #[test]
    fn asset_base_url_errors_when_not_set() {
        let cfg = Config::default();
        let err = cfg.asset_base_url().unwrap_err();

        assert!(err.to_string().contains("No asset base URL configured"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            asset_base_url: Some("http://localhost:5173".into()),
            default_variation: Variation::Line,
            enable_animation: false,
            prefer_gif: false,
            fetch_timeout_secs: Some(5),
        };
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.fetch_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_variation = \"line\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.default_variation, Variation::Line);
        assert!(cfg.enable_animation);
        assert!(cfg.prefer_gif);
        assert_eq!(cfg.fetch_timeout(), None);
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_variation = \"outline\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn apply_overrides_request_preferences() {
        let cfg = Config { default_variation: Variation::Line, prefer_gif: false, ..Default::default() };
        let request = cfg.apply(IconRequest::new(ConditionCode::CLEAR, TimeOfDay::Day));

        assert_eq!(request.variation, Variation::Line);
        assert!(request.enable_animation);
        assert!(!request.prefer_gif);
    }
}
