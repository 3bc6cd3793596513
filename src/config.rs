//! Configuration file handling.
//!
//! Loads defaults from `~/.config/glyphview/config.toml` or a custom path.
//! A missing file is not an error; a malformed one is.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level configuration file structure.
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
}

/// `[render]` table: output defaults the CLI can override per run.
#[derive(Debug, Deserialize, PartialEq)]
pub struct RenderConfig {
    /// Color half-block output; braille dots when false.
    #[serde(default = "default_color")]
    pub color: bool,
    /// Autocontrast blend strength, 0 to 1.
    #[serde(default = "default_contrast")]
    pub contrast: f32,
    /// Fixed output width in columns instead of the terminal width.
    #[serde(default)]
    pub width: Option<u32>,
    /// Fixed output height in rows instead of the terminal height.
    #[serde(default)]
    pub height: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            contrast: default_contrast(),
            width: None,
            height: None,
        }
    }
}

fn default_color() -> bool {
    true
}

fn default_contrast() -> f32 {
    0.25
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl Config {
    /// Load configuration from a file path, or the default location when
    /// none is given. Returns defaults if the file doesn't exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }
}

/// Default config file path.
pub fn default_path() -> PathBuf {
    directories::ProjectDirs::from("com", "glyphview", "glyphview")
        .map(|d| d.config_dir().join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/glyphview/config.toml")
        })
}
