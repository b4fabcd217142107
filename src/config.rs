//! Configuration management for the weather-alert service
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. The monitored
//! location list is injected here rather than hardcoded so the fetcher,
//! classifier, and matcher stay testable in isolation; changing the list
//! is a redeploy-time operation.

use crate::WeatherAlertError;
use crate::models::Location;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the weather-alert service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Upstream forecast API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Forecast cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Task source configuration
    #[serde(default)]
    pub tasks: TasksConfig,
    /// Monitored locations, in dashboard display order
    #[serde(default = "default_locations")]
    pub locations: Vec<LocationConfig>,
}

/// Upstream forecast API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API (no key required)
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Forecast cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Freshness window in minutes for cached forecast days
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// Task source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Path to the JSON task export read by the standalone task store
    #[serde(default = "default_tasks_path")]
    pub path: String,
}

/// One monitored location entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    pub key: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_weather_timeout() -> u32 {
    10
}

fn default_cache_ttl() -> u32 {
    15
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_tasks_path() -> String {
    "tasks.json".to_string()
}

fn default_locations() -> Vec<LocationConfig> {
    vec![
        LocationConfig {
            key: "dublin".to_string(),
            name: "Dublin, Ireland".to_string(),
            latitude: 53.3498,
            longitude: -6.2603,
            timezone: "Europe/Dublin".to_string(),
        },
        LocationConfig {
            key: "ile-de-re".to_string(),
            name: "Île de Ré, France".to_string(),
            latitude: 46.2,
            longitude: -1.4,
            timezone: "Europe/Paris".to_string(),
        },
    ]
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            path: default_tasks_path(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig::default(),
            cache: CacheConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            tasks: TasksConfig::default(),
            locations: default_locations(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with WUNDERLISTS_ prefix,
        // e.g. WUNDERLISTS_WEATHER__TIMEOUT_SECONDS=5
        builder = builder.add_source(
            Environment::with_prefix("WUNDERLISTS")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: AppConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wunderlists-weather").join("config.toml"))
    }

    /// Monitored locations in configured order
    #[must_use]
    pub fn monitored_locations(&self) -> Vec<Location> {
        self.locations
            .iter()
            .map(|loc| {
                Location::new(
                    loc.key.clone(),
                    loc.name.clone(),
                    loc.latitude,
                    loc.longitude,
                    loc.timezone.clone(),
                )
            })
            .collect()
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(WeatherAlertError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.cache.ttl_minutes > 1440 {
            return Err(
                WeatherAlertError::config("Cache TTL cannot exceed 1440 minutes (1 day)").into(),
            );
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherAlertError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherAlertError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(WeatherAlertError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if self.locations.is_empty() {
            return Err(
                WeatherAlertError::config("At least one monitored location is required").into(),
            );
        }

        for loc in &self.locations {
            if !(-90.0..=90.0).contains(&loc.latitude) {
                return Err(WeatherAlertError::config(format!(
                    "Latitude for '{}' must be between -90 and 90, got: {}",
                    loc.key, loc.latitude
                ))
                .into());
            }
            if !(-180.0..=180.0).contains(&loc.longitude) {
                return Err(WeatherAlertError::config(format!(
                    "Longitude for '{}' must be between -180 and 180, got: {}",
                    loc.key, loc.longitude
                ))
                .into());
            }
            if loc.key.is_empty() || loc.name.is_empty() {
                return Err(WeatherAlertError::config(
                    "Location key and name cannot be empty",
                )
                .into());
            }
        }

        Ok(())
    }
}
