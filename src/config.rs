//! Configuration management for flixtui
//!
//! Handles config file loading and environment overrides.
//! Config is stored at ~/.config/flixtui/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::DEFAULT_PROFILES;
use crate::search::debounce::DEFAULT_WINDOW;
use crate::ui::theme::ThemeMode;

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
pub const DEFAULT_IMAGE_ORIGINAL_URL: &str = "https://image.tmdb.org/t/p/original";

/// Environment variables recognized on top of the config file
pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "TMDB_ACCESS_TOKEN";
pub const ENV_BASE_URL: &str = "TMDB_BASE_URL";
pub const ENV_IMAGE_BASE_URL: &str = "TMDB_IMAGE_BASE_URL";
pub const ENV_IMAGE_ORIGINAL_URL: &str = "TMDB_IMAGE_ORIGINAL_URL";

/// Metadata API and image CDN settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbSettings {
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub base_url: String,
    pub image_base_url: String,
    pub image_original_url: String,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            access_token: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            image_original_url: DEFAULT_IMAGE_ORIGINAL_URL.to_string(),
        }
    }
}

impl TmdbSettings {
    /// Bearer credential: the access token, else the API key, else empty.
    /// Blank values count as unset.
    pub fn bearer(&self) -> String {
        fn present(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        present(&self.access_token)
            .or_else(|| present(&self.api_key))
            .unwrap_or_default()
            .to_string()
    }

    pub fn has_credentials(&self) -> bool {
        !self.bearer().is_empty()
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tmdb: TmdbSettings,
    /// dark, light or system
    pub theme: ThemeMode,
    /// Quiescence window for the local catalog search
    pub search_debounce_ms: u64,
    /// Quiescence window for the remote explore search
    pub explore_debounce_ms: u64,
    /// Explore only hits the network once the query is this long
    pub explore_min_query_len: usize,
    /// Names shown on the profile picker
    pub profiles: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmdb: TmdbSettings::default(),
            theme: ThemeMode::Dark,
            search_debounce_ms: DEFAULT_WINDOW.as_millis() as u64,
            explore_debounce_ms: 300,
            explore_min_query_len: 3,
            profiles: DEFAULT_PROFILES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl Config {
    /// Get config file path (~/.config/flixtui/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flixtui").join("config.toml"))
    }

    /// Load config from the default path, or return defaults if missing or invalid.
    /// Environment overrides are applied either way.
    pub fn load() -> Self {
        let mut config = Self::path()
            .filter(|p| p.exists())
            .and_then(|p| match Self::read(&p) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "Ignoring unreadable config");
                    None
                }
            })
            .unwrap_or_default();
        config.apply_env();
        config
    }

    /// Load config from an explicit path; unlike `load`, errors are reported
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = Self::read(path)?;
        config.apply_env();
        Ok(config)
    }

    fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Apply TMDB_* environment variables over file values
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any lookup (environment, or a map in tests).
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.tmdb.api_key = Some(key);
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.tmdb.access_token = Some(token);
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.tmdb.base_url = url;
        }
        if let Some(url) = get(ENV_IMAGE_BASE_URL) {
            self.tmdb.image_base_url = url;
        }
        if let Some(url) = get(ENV_IMAGE_ORIGINAL_URL) {
            self.tmdb.image_original_url = url;
        }
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn explore_debounce(&self) -> Duration {
        Duration::from_millis(self.explore_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.tmdb.api_key.is_none());
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.search_debounce(), DEFAULT_WINDOW);
        assert_eq!(DEFAULT_WINDOW, Duration::from_millis(500));
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.profiles.len(), DEFAULT_PROFILES.len());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let env: HashMap<&str, &str> = [
            (ENV_ACCESS_TOKEN, "token"),
            (ENV_BASE_URL, "http://localhost:9999"),
            (ENV_IMAGE_BASE_URL, ""),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.tmdb.access_token.as_deref(), Some("token"));
        assert_eq!(config.tmdb.base_url, "http://localhost:9999");
        // empty values keep the default
        assert_eq!(config.tmdb.image_base_url, DEFAULT_IMAGE_BASE_URL);
    }

    #[test]
    fn test_bearer_prefers_access_token() {
        let mut settings = TmdbSettings::default();
        assert_eq!(settings.bearer(), "");
        assert!(!settings.has_credentials());

        settings.api_key = Some("key".into());
        assert_eq!(settings.bearer(), "key");

        settings.access_token = Some("token".into());
        assert_eq!(settings.bearer(), "token");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            theme = "light"
            search_debounce_ms = 250

            [tmdb]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.search_debounce_ms, 250);
        assert_eq!(config.explore_debounce_ms, 300);
        assert_eq!(config.tmdb.api_key.as_deref(), Some("abc"));
        assert_eq!(config.tmdb.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_written_config_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.explore_min_query_len = 4;
        config.profiles = vec!["Kim".into()];
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::read(&path).unwrap();
        assert_eq!(loaded.explore_min_query_len, 4);
        assert_eq!(loaded.profiles, vec!["Kim".to_string()]);
    }

    #[test]
    fn test_load_from_missing_path_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        let err = Config::load_from(&path).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("reading config"), "{}", message);
        assert!(message.contains("nope.toml"), "{}", message);
    }

    #[test]
    fn test_load_from_bad_toml_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "theme = [").unwrap();

        let message = format!("{:#}", Config::load_from(&path).unwrap_err());
        assert!(message.contains("parsing config"), "{}", message);
        assert!(message.contains("broken.toml"), "{}", message);
    }

    #[test]
    fn test_blank_access_token_falls_back_to_api_key() {
        let config: Config = toml::from_str(
            r#"
            [tmdb]
            access_token = ""
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.tmdb.bearer(), "abc");
        assert!(config.tmdb.has_credentials());

        let blank = TmdbSettings {
            api_key: Some("  ".into()),
            ..TmdbSettings::default()
        };
        assert!(!blank.has_credentials());
    }
}
