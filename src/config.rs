//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::DEFAULT_MODEL;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Studio backend the client talks to
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_model")]
    pub model: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            model: default_model(),
        }
    }
}

impl BackendConfig {
    /// `http://<host>:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Local storage location (theme, todos, mood board)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("orion").to_string_lossy().to_string())
        .unwrap_or_else(|| "./orion_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// `data_dir` with a leading `~` resolved to the home directory
    pub fn data_path(&self) -> PathBuf {
        expand_home(&self.data_dir, dirs::home_dir())
    }
}

fn expand_home(raw: &str, home: Option<PathBuf>) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(raw),
    };
    match home {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}

/// Chat session timing
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_save_debounce")]
    pub save_debounce_ms: u64,

    #[serde(default = "default_min_typing")]
    pub min_typing_ms: u64,

    #[serde(default = "default_history_turns")]
    pub history_turns: usize,
}

fn default_save_debounce() -> u64 {
    1000
}

fn default_min_typing() -> u64 {
    600
}

fn default_history_turns() -> usize {
    crate::session::prompt::HISTORY_TURNS
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_debounce_ms: default_save_debounce(),
            min_typing_ms: default_min_typing(),
            history_turns: default_history_turns(),
        }
    }
}

impl SessionConfig {
    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    pub fn min_typing(&self) -> Duration {
        Duration::from_millis(self.min_typing_ms)
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
    "warn".to_string()
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

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
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
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("orion").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `ORION_*` overrides from any variable source
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Backend overrides
        if let Some(host) = var("ORION_BACKEND_HOST") {
            self.backend.host = host;
        }
        if let Some(port) = var("ORION_BACKEND_PORT") {
            if let Ok(p) = port.parse() {
                self.backend.port = p;
            }
        }
        if let Some(model) = var("ORION_MODEL") {
            self.backend.model = model;
        }

        // Storage overrides
        if let Some(data_dir) = var("ORION_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        // Logging overrides
        if let Some(level) = var("ORION_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ORION_LOG_FORMAT") {
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
    format!(
        r#"# Orion Configuration
#
# Environment variables override these settings:
# - ORION_BACKEND_HOST
# - ORION_BACKEND_PORT
# - ORION_MODEL
# - ORION_DATA_DIR
# - ORION_LOG_LEVEL
# - ORION_LOG_FORMAT

[backend]
# Studio backend host and port
host = "127.0.0.1"
port = 8000

# Model requested for chat completions
model = "orion-12b-it:latest"

[storage]
# Directory for local data (theme, todos, mood board)
data_dir = '{data_dir}'

[session]
# Quiet period before a character transcript is saved (ms)
save_debounce_ms = 1000

# Minimum time the typing indicator stays visible (ms)
min_typing_ms = 600

# Transcript turns included in each character prompt
history_turns = 6

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#,
        data_dir = default_data_dir()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend.base_url(), "http://127.0.0.1:8000");
        assert_eq!(config.backend.model, "orion-12b-it:latest");
        assert_eq!(config.session.save_debounce(), Duration::from_millis(1000));
        assert_eq!(config.session.min_typing(), Duration::from_millis(600));
        assert_eq!(config.session.history_turns, 6);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse("[backend]\nport = 9001\n").unwrap();
        assert_eq!(config.backend.port, 9001);
        assert_eq!(config.backend.host, "127.0.0.1");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.backend.port, 8000);
        assert_eq!(config.session.history_turns, 6);
    }

    #[test]
    fn test_generated_data_dir_is_usable_as_is() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.storage.data_dir, default_data_dir());
        assert!(!config.storage.data_dir.starts_with('~'));
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let home = PathBuf::from("/home/ada");
        assert_eq!(
            expand_home("~/.local/share/orion", Some(home.clone())),
            PathBuf::from("/home/ada/.local/share/orion")
        );
        assert_eq!(expand_home("~", Some(home.clone())), home);
        assert_eq!(expand_home("~other/x", Some(home.clone())), PathBuf::from("~other/x"));
        assert_eq!(expand_home("/srv/orion", Some(home)), PathBuf::from("/srv/orion"));
        assert_eq!(expand_home("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ORION_BACKEND_HOST", "studio.local"),
            ("ORION_BACKEND_PORT", "not-a-port"),
            ("ORION_MODEL", "orion-7b:latest"),
            ("ORION_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.backend.host, "studio.local");
        assert_eq!(config.backend.port, 8000);
        assert_eq!(config.backend.model, "orion-7b:latest");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend\nport = ").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { path: ref p, .. } if p == &path));
    }
}
