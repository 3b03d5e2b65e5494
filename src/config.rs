/// Application configuration
///
/// Stored as JSON in the user's config directory:
/// - Linux: ~/.config/style-classifier/config.json
/// - macOS: ~/Library/Application Support/style-classifier/config.json
/// - Windows: %APPDATA%\style-classifier\config.json
///
/// A missing file means defaults. Every field is optional in the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8001";

/// Log verbosity, overridden by `RUST_LOG` when set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the classification service (e.g., "http://localhost:8001")
    pub service_url: String,
    pub dark_theme: bool,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            dark_theme: true,
            log_level: LogLevel::Info,
        }
    }
}

impl AppConfig {
    /// Where the config file lives, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("style-classifier");
        path.push("config.json");
        Some(path)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let mut config: Self = serde_json::from_str(json)?;
        config.service_url = config.service_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(json) => Ok(Self::from_json(&json)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Write the config file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load from the default location, falling back to defaults on any error
    ///
    /// Logging is not initialized yet when this runs, so problems are
    /// returned alongside the config for the caller to report.
    pub fn load() -> (Self, Option<String>) {
        let Some(path) = Self::default_path() else {
            return (Self::default(), None);
        };

        // First launch: write the defaults so there is a file to edit
        if !path.exists() {
            let config = Self::default();
            let problem = config.save_to(&path).err().map(|err| {
                format!("Could not write default config to {}: {}", path.display(), err)
            });
            return (config, problem);
        }

        match Self::load_from(&path) {
            Ok(config) => (config, None),
            Err(err) => (
                Self::default(),
                Some(format!("Ignoring {}: {}", path.display(), err)),
            ),
        }
    }
}
