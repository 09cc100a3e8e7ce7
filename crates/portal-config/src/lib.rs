mod preferences;

pub use preferences::{PreferenceStore, Preferences, STORAGE_NAME, ViewMode, ViewPreference};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration for the portal console (`config.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Upper bound for the bulk fetch that loads a collection
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Name of the environment variable holding the bearer token
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub mode: SourceMode,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// User id that `--assignee current_user` resolves to
    #[serde(default)]
    pub current_user: Option<String>,
}

/// Where collections are loaded from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    Rest,
    Stub,
    /// REST, with demo data when the API is unreachable
    #[default]
    Fallback,
}

impl FromStr for SourceMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(SourceMode::Rest),
            "stub" => Ok(SourceMode::Stub),
            "fallback" => Ok(SourceMode::Fallback),
            other => {
                anyhow::bail!("unknown source mode: {other} (expected rest, stub or fallback)")
            }
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceMode::Rest => "rest",
            SourceMode::Stub => "stub",
            SourceMode::Fallback => "fallback",
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            fetch_limit: default_fetch_limit(),
            token_env: default_token_env(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_fetch_limit() -> usize {
    500
}

fn default_token_env() -> String {
    "PORTAL_API_TOKEN".to_string()
}

impl Config {
    /// Load config from default location or create default if not found
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path();

        if path.exists() {
            Self::load_from(&path)
        } else {
            // Create default config file
            let config = Config::default();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(&path, content)?;
            Ok(config)
        }
    }

    /// Load an explicit config file
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get config file path
    pub fn config_path() -> PathBuf {
        if let Some(dirs) = directories::ProjectDirs::from("com", "portal", "portal") {
            dirs.config_dir().join("config.toml")
        } else {
            PathBuf::from("~/.portal/config.toml")
        }
    }

    /// Apply `PORTAL_API_URL`, `PORTAL_SOURCE_MODE` and `PORTAL_CURRENT_USER`
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        if let Some(url) = lookup("PORTAL_API_URL") {
            self.api.base_url = url;
        }
        if let Some(mode) = lookup("PORTAL_SOURCE_MODE") {
            self.source.mode = mode.parse()?;
        }
        if let Some(user) = lookup("PORTAL_CURRENT_USER") {
            self.session.current_user = Some(user).filter(|u| !u.trim().is_empty());
        }
        Ok(self)
    }

    /// Bearer token from the configured environment variable, if set
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.api.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.fetch_limit, 500);
        assert_eq!(config.source.mode, SourceMode::Fallback);
        assert!(config.session.current_user.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.timeout_secs, config.api.timeout_secs);
        assert_eq!(parsed.source.mode, config.source.mode);
    }

    #[test]
    fn test_partial_config_parse() {
        let toml_str = r#"
[api]
base_url = "https://admin.example.com/api"

[source]
mode = "rest"

[session]
current_user = "u-1"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "https://admin.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.source.mode, SourceMode::Rest);
        assert_eq!(config.session.current_user.as_deref(), Some("u-1"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("PORTAL_API_URL", "http://127.0.0.1:9000/api"),
            ("PORTAL_SOURCE_MODE", "stub"),
            ("PORTAL_CURRENT_USER", "u-3"),
        ]
        .into_iter()
        .collect();
        let config = Config::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:9000/api");
        assert_eq!(config.source.mode, SourceMode::Stub);
        assert_eq!(config.session.current_user.as_deref(), Some("u-3"));
    }

    #[test]
    fn test_bad_source_mode_is_an_error() {
        let result = Config::default().with_overrides(|key| {
            (key == "PORTAL_SOURCE_MODE").then(|| "cache".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nfetch_limit = 50\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api.fetch_limit, 50);
        assert!(Config::load_from(&dir.path().join("missing.toml")).is_err());
    }
}
