//! Service configuration.
//!
//! Settings come from a TOML file (`meeus.toml`) with every key optional, then
//! `MEEUS_*` environment variables override individual values:
//!
//! - `MEEUS_CONFIG`: path of the configuration file
//! - `MEEUS_HOST`, `MEEUS_PORT`: HTTP bind address
//! - `MEEUS_LONGITUDE`, `MEEUS_LATITUDE`, `MEEUS_LOCATION_NAME`: observer site

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use meeus_core::CalendarReform;

use crate::models::ObserverLocation;
use crate::services::PollerSettings;

pub const CONFIG_FILE_NAME: &str = "meeus.toml";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Full service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub observer: ObserverConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub polling: PollingConfig,
}

/// HTTP bind address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Observer site used for local sidereal time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverConfig {
    #[serde(default = "default_location_name")]
    pub name: String,
    #[serde(default = "default_latitude")]
    pub latitude: f64,
    /// Degrees, positive east
    #[serde(default = "default_longitude")]
    pub longitude: f64,
    #[serde(default)]
    pub elevation_m: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    pub reform: CalendarReform,
}

/// Poll periods in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_sidereal_interval")]
    pub sidereal_interval_secs: u64,
    #[serde(default = "default_calendar_interval")]
    pub calendar_interval_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_location_name() -> String {
    ObserverLocation::greenwich().name
}

fn default_latitude() -> f64 {
    ObserverLocation::greenwich().latitude
}

fn default_longitude() -> f64 {
    ObserverLocation::greenwich().longitude
}

fn default_sidereal_interval() -> u64 {
    1
}

fn default_calendar_interval() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ObserverConfig {
    fn default() -> Self {
        let greenwich = ObserverLocation::greenwich();
        Self {
            name: greenwich.name,
            latitude: greenwich.latitude,
            longitude: greenwich.longitude,
            elevation_m: greenwich.elevation_m,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            sidereal_interval_secs: default_sidereal_interval(),
            calendar_interval_secs: default_calendar_interval(),
        }
    }
}

impl ObserverConfig {
    /// Validated observer location.
    pub fn location(&self) -> Result<ObserverLocation, ConfigError> {
        ObserverLocation::new(
            self.name.clone(),
            self.latitude,
            self.longitude,
            self.elevation_m,
        )
        .map_err(|reason| ConfigError::invalid("observer", reason))
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            origin: "<inline>".to_string(),
            source,
        })
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Load `meeus.toml` from the first standard location that has one.
    ///
    /// Searches:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    ///
    /// Falls back to built-in defaults when no file exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        info!("No {} found, using defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Load from file (or defaults), apply environment overrides and validate.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("MEEUS_CONFIG") {
            Ok(path) => {
                info!("Loading configuration from {}", path);
                Self::from_file(path)?
            }
            Err(_) => Self::from_default_location()?,
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `MEEUS_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("MEEUS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("MEEUS_PORT") {
            self.server.port = parse_override("MEEUS_PORT", &port)?;
        }
        if let Some(name) = lookup("MEEUS_LOCATION_NAME") {
            self.observer.name = name;
        }
        if let Some(latitude) = lookup("MEEUS_LATITUDE") {
            self.observer.latitude = parse_override("MEEUS_LATITUDE", &latitude)?;
        }
        if let Some(longitude) = lookup("MEEUS_LONGITUDE") {
            self.observer.longitude = parse_override("MEEUS_LONGITUDE", &longitude)?;
        }
        debug!(config = ?self, "Configuration after overrides");
        Ok(())
    }

    /// Check every value the service depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::invalid("server.host", "must not be empty"));
        }
        self.observer.location()?;
        if self.polling.sidereal_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "polling.sidereal_interval_secs",
                "must be at least 1",
            ));
        }
        if self.polling.calendar_interval_secs == 0 {
            return Err(ConfigError::invalid(
                "polling.calendar_interval_secs",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn poller_settings(&self) -> Result<PollerSettings, ConfigError> {
        Ok(PollerSettings {
            location: self.observer.location()?,
            reform: self.calendar.reform,
            sidereal_interval: Duration::from_secs(self.polling.sidereal_interval_secs),
            calendar_interval: Duration::from_secs(self.polling.calendar_interval_secs),
        })
    }
}

fn parse_override<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid(key, format!("'{}': {}", raw, e)))
}
