//! Viewer configuration loading.
//!
//! Read from `config.toml` in the platform config directory. A missing file
//! means defaults; a malformed one is an error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;
use crate::{FeatureError, Result};

/// Environment variable overriding `api.api_key`.
pub const API_KEY_ENV: &str = "FEATURE_VIEW_API_KEY";

const CONFIG_FILE: &str = "config.toml";

/// Viewer configuration
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    pub api: ApiConfig,
    pub log: LogConfig,
}

/// Object API settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without the `/object` suffix
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout applied by the HTTP client
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 15,
        }
    }
}

/// Logging settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// EnvFilter directive, used when RUST_LOG is unset
    pub filter: String,
    /// Write logs to a daily rolling file in the data directory
    pub to_file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "feature_view=info,feature_viewer=info".to_string(),
            to_file: false,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from the platform config directory.
    ///
    /// The API key environment variable wins over the file.
    pub fn load() -> Result<Self> {
        let mut config = match config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.api.api_key = key;
        }

        Ok(config)
    }

    /// Load configuration from a specific file, falling back to defaults if it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
            .map_err(|e| FeatureError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Parse configuration from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| FeatureError::Config(e.to_string()))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "FeatureView", "feature-view")
}

/// Path of the config file, if a home directory can be resolved.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Directory for log files.
pub fn log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 15);
        assert!(config.api.api_key.is_empty());
        assert!(!config.log.to_file);
    }

    #[test]
    fn test_parse_partial() {
        let config = ViewerConfig::parse(
            r#"
            [api]
            api_key = "abc123"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.api_key, "abc123");
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_parse_full() {
        let config = ViewerConfig::parse(
            r#"
            [api]
            base_url = "http://localhost:9000"
            api_key = "k"
            timeout_secs = 3

            [log]
            filter = "debug"
            to_file = true
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.log.filter, "debug");
        assert!(config.log.to_file);
    }

    #[test]
    fn test_parse_malformed() {
        let err = ViewerConfig::parse("[api\nbase_url = ").unwrap_err();
        assert!(matches!(err, FeatureError::Config(_)));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = PathBuf::from("/nonexistent/feature-view/config.toml");
        assert_eq!(ViewerConfig::load_from(&path).unwrap(), ViewerConfig::default());
    }
}
