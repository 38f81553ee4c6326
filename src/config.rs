use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::theme::ThemeConfig;

pub const CONFIG_ENV: &str = "CLUB_CALENDAR_CONFIG";
pub const API_URL_ENV: &str = "CLUB_CALENDAR_API_URL";

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Log file; the terminal itself belongs to the UI.
    pub file: Option<PathBuf>,
    /// `EnvFilter` directives, used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: None,
            filter: "info".to_string(),
        }
    }
}

impl LogConfig {
    pub fn file_path(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("club-calendar")
                .join("club-calendar.log")
        })
    }
}

impl Config {
    /// Reads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.apply_api_url(&url);
        }
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn apply_api_url(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api.base_url = url.to_string();
        }
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|d| d.join("club-calendar").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert_eq!(config.api.timeout(), Duration::from_secs(10));
        assert_eq!(config.log.filter, "info");
    }

    #[test]
    fn sections_are_read() {
        let config = Config::parse(
            r##"
            [api]
            base_url = "https://club.example.org"
            timeout_secs = 0

            [log]
            file = "/tmp/cal.log"
            filter = "club_calendar=debug"

            [theme]
            preset = "gruvbox"
            event_fg = "#ffcc00"
            "##,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://club.example.org");
        assert_eq!(config.api.timeout(), Duration::from_secs(1));
        assert_eq!(config.log.file_path(), PathBuf::from("/tmp/cal.log"));
        assert_eq!(config.theme.preset.as_deref(), Some("gruvbox"));
    }

    #[test]
    fn unknown_keys_are_errors() {
        assert!(Config::parse("[api]\nbase = \"x\"").is_err());
    }

    #[test]
    fn blank_url_override_is_ignored() {
        let mut config = Config::default();
        config.apply_api_url("   ");
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        config.apply_api_url(" http://10.0.0.2:8080 ");
        assert_eq!(config.api.base_url, "http://10.0.0.2:8080");
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = Config::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
