//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base path of the report API, e.g. "/api" or "http://localhost:5000/api"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "/api".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash
    pub fn normalized_base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Dashboard behaviour settings
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u32,

    /// How long an armed delete control waits for the second click
    #[serde(default = "default_confirm_window")]
    pub delete_confirm_window_ms: u32,

    #[serde(default = "default_preview_chars")]
    pub description_preview_chars: usize,
}

fn default_toast_duration() -> u32 {
    3000
}

fn default_confirm_window() -> u32 {
    3000
}

fn default_preview_chars() -> usize {
    140
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_duration(),
            delete_confirm_window_ms: default_confirm_window(),
            description_preview_chars: default_preview_chars(),
        }
    }
}

/// Photo attachment limits
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_photo_bytes")]
    pub max_photo_bytes: u64,

    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

fn default_max_photo_bytes() -> u64 {
    5 * 1024 * 1024 // 5 MiB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/jpg".to_string(),
        "image/png".to_string(),
    ]
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: default_max_photo_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(path, &content)
    }

    /// Parse configuration from TOML text
    pub fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("civic-reporter").join("config.toml")),
            Some(PathBuf::from("./civic-reporter.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(base) = std::env::var("CIVIC_API_BASE") {
            self.api.base_url = base;
        }
        if let Ok(timeout) = std::env::var("CIVIC_REQUEST_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        if let Ok(level) = std::env::var("CIVIC_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CIVIC_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Civic Reporter Configuration
#
# Environment variables override these settings:
# - CIVIC_API_BASE
# - CIVIC_REQUEST_TIMEOUT_SECS
# - CIVIC_LOG_LEVEL
# - CIVIC_LOG_FORMAT

[api]
# Base path of the report API
base_url = "/api"

# Request timeout in seconds (native client)
request_timeout_secs = 30

[ui]
# How long notifications stay visible (ms)
toast_duration_ms = 3000

# Window for the second click on a delete control (ms)
delete_confirm_window_ms = 3000

# Characters of the description shown in the list
description_preview_chars = 140

[upload]
# Largest accepted photo (bytes)
max_photo_bytes = 5242880

# Accepted photo types
allowed_mime_types = ["image/jpeg", "image/jpg", "image/png"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "/api");
        assert_eq!(config.ui.delete_confirm_window_ms, 3000);
        assert_eq!(config.upload.max_photo_bytes, 5 * 1024 * 1024);
        assert!(config.upload.allowed_mime_types.contains(&"image/png".to_string()));
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(Path::new("generated"), &generate_default_config()).unwrap();
        assert_eq!(config.ui.toast_duration_ms, 3000);
        assert_eq!(config.upload.max_photo_bytes, 5_242_880);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:5000/api/\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.normalized_base(), "http://localhost:5000/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.description_preview_chars, 140);
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("CIVIC_API_BASE", "http://reports.example.org/api");
        std::env::set_var("CIVIC_REQUEST_TIMEOUT_SECS", "not-a-number");

        let config = Config::from_env();

        std::env::remove_var("CIVIC_API_BASE");
        std::env::remove_var("CIVIC_REQUEST_TIMEOUT_SECS");

        assert_eq!(config.api.base_url, "http://reports.example.org/api");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.ui.delete_confirm_window_ms, 3000);
    }

    #[test]
    fn test_load_errors() {
        let missing = Config::load(Path::new("/nonexistent/civic.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let bad = Config::parse(Path::new("bad.toml"), "[ui]\ntoast_duration_ms = \"soon\"");
        assert!(matches!(bad, Err(ConfigError::Parse { .. })));
    }
}
