//! Configuration system
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub shell: ShellConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data layer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("cliniboard").to_string_lossy().to_string())
        .unwrap_or_else(|| "./cliniboard_data".to_string())
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Navigation shell configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ShellConfig {
    /// View opened when no saved page exists
    #[serde(default = "default_view")]
    pub default_view: String,

    /// Directory holding the per-view markup fragments
    #[serde(default = "default_markup_dir")]
    pub markup_dir: String,
}

fn default_view() -> String {
    "specialties".to_string()
}

fn default_markup_dir() -> String {
    "./markup".to_string()
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            default_view: default_view(),
            markup_dir: default_markup_dir(),
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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
            dirs::config_dir().map(|p| p.join("cliniboard").join("config.toml")),
            Some(PathBuf::from("/etc/cliniboard/config.toml")),
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

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(data_dir) = std::env::var("CLINIBOARD_DATA_DIR") {
            self.data.data_dir = data_dir;
        }

        if let Ok(view) = std::env::var("CLINIBOARD_DEFAULT_VIEW") {
            self.shell.default_view = view;
        }
        if let Ok(markup_dir) = std::env::var("CLINIBOARD_MARKUP_DIR") {
            self.shell.markup_dir = markup_dir;
        }

        if let Ok(level) = std::env::var("CLINIBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("CLINIBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            shell: ShellConfig::default(),
            logging: LoggingConfig::default(),
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
    r#"# Cliniboard Configuration
#
# Environment variables override these settings:
# - CLINIBOARD_DATA_DIR
# - CLINIBOARD_DEFAULT_VIEW
# - CLINIBOARD_MARKUP_DIR
# - CLINIBOARD_LOG_LEVEL
# - CLINIBOARD_LOG_FORMAT

[data]
# Directory for the persisted collections (one JSON file per kind)
data_dir = "~/.local/share/cliniboard"

[shell]
# View opened when no saved page exists
default_view = "specialties"

# Directory holding the per-view markup fragments
markup_dir = "./markup"

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

    #[test]
    fn test_empty_file_gets_full_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.shell.default_view, "specialties");
        assert_eq!(config.shell.markup_dir, "./markup");
        assert_eq!(config.logging.level, "info");
        assert!(!config.data.data_dir.is_empty());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [shell]
            default_view = "patients"
            "#,
        )
        .unwrap();
        assert_eq!(config.shell.default_view, "patients");
        assert_eq!(config.shell.markup_dir, "./markup");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_default_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.shell.default_view, "specialties");
    }
}
