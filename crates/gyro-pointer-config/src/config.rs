//! Application configuration loaded from TOML

use crate::venue::{
    Venue, VenueError, DEFAULT_DEPTH, DEFAULT_GRID_SIZE, DEFAULT_HEIGHT, DEFAULT_USER_HEIGHT,
    DEFAULT_WIDTH,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration. Every section is optional in the file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub venue: VenueConfig,
    pub buffer: BufferConfig,
    pub logging: LoggingConfig,
}

/// `[venue]` section, flat in the file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueConfig {
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub grid_size: f64,
    pub user_height: f64,
}

impl Default for VenueConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            depth: DEFAULT_DEPTH,
            height: DEFAULT_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            user_height: DEFAULT_USER_HEIGHT,
        }
    }
}

impl VenueConfig {
    pub fn to_venue(&self) -> Result<Venue, VenueError> {
        Venue::new(
            self.width,
            self.depth,
            self.height,
            self.grid_size,
            self.user_height,
        )
    }
}

/// `[buffer]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    /// Samples kept for latency compensation
    pub capacity: usize,
    /// Use the interpolated sample; when false the latest one is used as-is
    pub interpolate: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: gyro_pointer_spatial::buffer::DEFAULT_CAPACITY,
            interpolate: true,
        }
    }
}

/// `[logging]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// An `EnvFilter` directive, e.g. `info` or `gyro_pointer_session=debug`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and parse a config file; the venue section must be valid
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse a config document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
        config.venue.to_venue().context("Invalid [venue] section")?;
        Ok(config)
    }

    /// Load `path` when given, else the per-user config file, else defaults.
    ///
    /// An explicit path must exist. The per-user file is optional.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `config.toml` in the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gyro-pointer")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// The configured venue, validated
    pub fn venue(&self) -> Result<Venue, VenueError> {
        self.venue.to_venue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = write_config("");
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.buffer.capacity, 3);
        assert!(config.buffer.interpolate);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let file = write_config(
            r#"
[venue]
width = 20.0
user_height = 1.2

[buffer]
interpolate = false
"#,
        );
        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.venue.width, 20.0);
        assert_eq!(config.venue.depth, DEFAULT_DEPTH);
        assert!(!config.buffer.interpolate);
        assert_eq!(config.buffer.capacity, 3);

        let venue = config.venue().unwrap();
        assert_eq!(venue.user_position().x, 10.0);
        assert_eq!(venue.user_position().z, 1.2);
    }

    #[test]
    fn test_invalid_venue_is_load_error() {
        let file = write_config("[venue]\nheight = 500.0\n");
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("height"), "got {err:#}");
    }

    #[test]
    fn test_malformed_toml() {
        let file = write_config("[venue\nwidth = ");
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(AppConfig::load_or_default(Some(&missing)).is_err());
    }

    #[test]
    fn test_load_or_default_explicit_path() {
        let file = write_config("[logging]\nlevel = \"debug\"\n");
        let config = AppConfig::load_or_default(Some(file.path())).unwrap();
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = AppConfig::default();
        config.buffer.capacity = 5;
        let text = toml::to_string(&config).unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
