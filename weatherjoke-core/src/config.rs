use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::model::LanguagePair;

pub const ENV_SOURCE_LANG: &str = "WEATHERJOKE_SOURCE_LANG";
pub const ENV_TARGET_LANG: &str = "WEATHERJOKE_TARGET_LANG";
pub const ENV_TIMEOUT_SECS: &str = "WEATHERJOKE_TIMEOUT_SECS";
pub const ENV_CONTACT_EMAIL: &str = "MYMEMORY_EMAIL";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Base URLs of the four upstream services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub geocoding_url: String,
    pub weather_url: String,
    pub joke_url: String,
    pub translation_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocoding_url: "https://geocoding-api.open-meteo.com/v1/search".to_string(),
            weather_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            joke_url: "https://api.chucknorris.io/jokes/random".to_string(),
            translation_url: "https://api.mymemory.translated.net/get".to_string(),
        }
    }
}

/// Translator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub source: String,
    pub target: String,

    /// Sent to MyMemory as `de=`, which raises the anonymous daily quota.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        let pair = LanguagePair::default();
        Self { source: pair.source, target: pair.target, contact_email: None }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// timeout_secs = 10
///
/// [translation]
/// source = "en"
/// target = "es"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
    pub translation: TranslationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
            translation: TranslationConfig::default(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn language_pair(&self) -> LanguagePair {
        LanguagePair {
            source: self.translation.source.clone(),
            target: self.translation.target.clone(),
        }
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, use defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

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
        let dirs = ProjectDirs::from("dev", "weatherjoke", "weatherjoke")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        };

        if let Some(source) = get(ENV_SOURCE_LANG) {
            self.translation.source = source;
        }
        if let Some(target) = get(ENV_TARGET_LANG) {
            self.translation.target = target;
        }
        if let Some(email) = get(ENV_CONTACT_EMAIL) {
            self.translation.contact_email = Some(email);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .parse()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got '{raw}'"))?;
        }

        self.validate()
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        if self.translation.source.trim().is_empty() || self.translation.target.trim().is_empty() {
            bail!("translation languages must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_services() {
        let cfg = Config::default();

        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert_eq!(cfg.language_pair(), LanguagePair::default());
        assert!(cfg.endpoints.geocoding_url.contains("geocoding-api.open-meteo.com"));
        assert!(cfg.endpoints.translation_url.contains("mymemory"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("nope.toml")).expect("defaults");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.timeout_secs = 3;
        cfg.translation.target = "es".into();
        cfg.translation.contact_email = Some("me@example.com".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[translation]\ntarget = \"fr\"\n").expect("write");

        let cfg = Config::load_from(&path).expect("load");
        assert_eq!(cfg.translation.target, "fr");
        assert_eq!(cfg.translation.source, "en");
        assert_eq!(cfg.endpoints, Endpoints::default());
    }

    #[test]
    fn zero_timeout_in_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 0\n").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("timeout_secs must be greater than zero"));
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut cfg = Config::default();
        cfg.apply_overrides(lookup_from(&[
            (ENV_TARGET_LANG, "de"),
            (ENV_TIMEOUT_SECS, "4"),
            (ENV_CONTACT_EMAIL, "joker@example.com"),
        ]))
        .expect("valid overrides");

        assert_eq!(cfg.translation.target, "de");
        assert_eq!(cfg.translation.source, "en");
        assert_eq!(cfg.timeout_secs, 4);
        assert_eq!(cfg.translation.contact_email.as_deref(), Some("joker@example.com"));
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.apply_overrides(lookup_from(&[(ENV_TARGET_LANG, "  ")])).expect("ignored");
        assert_eq!(cfg.translation.target, "pt");
    }

    #[test]
    fn bad_timeout_override_is_an_error() {
        let mut cfg = Config::default();
        let err = cfg.apply_overrides(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));
    }
}
