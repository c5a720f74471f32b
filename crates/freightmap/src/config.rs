use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::model::Algorithm;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "freightmap";

/// Environment variable overriding the route service base URL.
pub const API_URL_ENV: &str = "FREIGHTMAP_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<Algorithm>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `freightmap config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(contents)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = format!("# freightmap configuration\n{}", self.to_yaml()?);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Resolve the base URL: flag, then environment, then config, then default.
    pub fn resolve_api_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        self.resolve_api_url_with(flag, env.as_deref())
    }

    fn resolve_api_url_with(&self, flag: Option<&str>, env: Option<&str>) -> String {
        let configured = self.api.as_ref().and_then(|a| a.base_url.as_deref());
        [flag, env, configured]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    pub fn default_algorithm(&self) -> Algorithm {
        self.defaults
            .as_ref()
            .and_then(|d| d.algorithm)
            .unwrap_or_default()
    }

    pub fn default_seed(&self) -> Option<i64> {
        self.defaults.as_ref().and_then(|d| d.seed)
    }

    pub fn theme_name(&self) -> &str {
        self.defaults
            .as_ref()
            .and_then(|d| d.theme.as_deref())
            .unwrap_or("light")
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.base_url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    anyhow::bail!(
                        "Invalid base URL: {value}. Must start with 'http://' or 'https://'."
                    );
                }
                self.api.get_or_insert_with(ApiConfig::default).base_url =
                    Some(value.trim_end_matches('/').to_string());
            }
            "defaults.algorithm" => {
                let Some(algorithm) = Algorithm::from_name(value) else {
                    anyhow::bail!(
                        "Invalid algorithm: {value}. Must be 'dijkstra', 'astar', or 'greedy'."
                    );
                };
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .algorithm = Some(algorithm);
            }
            "defaults.seed" => {
                let Ok(seed) = value.trim().parse::<i64>() else {
                    anyhow::bail!("Invalid seed: {value}. Must be an integer.");
                };
                self.defaults.get_or_insert_with(DefaultsConfig::default).seed = Some(seed);
            }
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: api.base_url, defaults.algorithm, defaults.seed, defaults.theme"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let yaml = "api:\n  base_url: http://routes.internal:9000\ndefaults:\n  algorithm: astar\n  seed: 7\n  theme: dark\n";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(config.default_algorithm(), Algorithm::Astar);
        assert_eq!(config.default_seed(), Some(7));
        assert_eq!(config.theme_name(), "dark");
        assert_eq!(
            config.resolve_api_url_with(None, None),
            "http://routes.internal:9000"
        );
    }

    #[test]
    fn test_empty_config_defaults() {
        let config = Config::parse("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_algorithm(), Algorithm::Dijkstra);
        assert_eq!(config.theme_name(), "light");
        assert_eq!(config.resolve_api_url_with(None, None), DEFAULT_API_URL);
    }

    #[test]
    fn test_api_url_precedence() {
        let mut config = Config::default();
        config.set("api.base_url", "http://from-config:1").unwrap();
        assert_eq!(
            config.resolve_api_url_with(Some("http://flag:1"), Some("http://env:1")),
            "http://flag:1"
        );
        assert_eq!(
            config.resolve_api_url_with(None, Some("http://env:1")),
            "http://env:1"
        );
        assert_eq!(
            config.resolve_api_url_with(None, Some("  ")),
            "http://from-config:1"
        );
    }

    #[test]
    fn test_set_valid_values() {
        let mut config = Config::default();
        config.set("defaults.algorithm", "greedy").unwrap();
        config.set("defaults.seed", "1234").unwrap();
        config.set("defaults.theme", "dark").unwrap();
        config.set("api.base_url", "https://example.org/").unwrap();
        assert_eq!(config.default_algorithm(), Algorithm::Greedy);
        assert_eq!(config.default_seed(), Some(1234));
        assert_eq!(
            config.api.as_ref().unwrap().base_url.as_deref(),
            Some("https://example.org")
        );

        let round_trip = Config::parse(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(round_trip, config);
    }

    #[test]
    fn test_set_rejects_invalid() {
        let mut config = Config::default();
        assert!(config.set("defaults.algorithm", "bfs").is_err());
        assert!(config.set("defaults.seed", "forty-two").is_err());
        assert!(config.set("defaults.theme", "solarized").is_err());
        assert!(config.set("api.base_url", "localhost:8000").is_err());
        let err = config.set("nope", "x").unwrap_err().to_string();
        assert!(err.contains("Valid keys"));
        assert_eq!(config, Config::default());
    }
}
