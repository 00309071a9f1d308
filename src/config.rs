//! Configuration management for the `TripPlanner` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripPlanner` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Geocoding API configuration
    #[serde(default)]
    pub geocoding: GeocodingConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Restaurant lookup configuration
    #[serde(default)]
    pub places: PlacesConfig,
    /// Session signing configuration
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Origin allowed by the CORS layer
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string
    #[serde(default)]
    pub url: String,
    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Re-geocode every stored attraction at startup
    #[serde(default)]
    pub refresh_coordinates_on_start: bool,
}

/// Geocoding API settings (OpenCage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// OpenCage API key
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the geocoding API
    #[serde(default = "default_geocoding_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Weather API settings (OpenWeatherMap)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the forecast API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Restaurant lookup settings (Google Places)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Places API key; enrichment is disabled when absent
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL for the places API
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Search radius around an attraction in meters
    #[serde(default = "default_places_radius")]
    pub radius_m: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
}

/// Session token settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// HMAC secret used to sign session tokens
    #[serde(default)]
    pub secret: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_port() -> u16 {
    7000
}

fn default_cors_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_geocoding_base_url() -> String {
    "https://api.opencagedata.com/geocode/v1/json".to_string()
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_places_radius() -> u32 {
    3000
}

fn default_timeout() -> u32 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            refresh_coordinates_on_start: false,
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_geocoding_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for PlacesConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_places_base_url(),
            radius_m: default_places_radius(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| PathBuf::from("config.toml"));
        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with PLANNER_ prefix, e.g.
        // PLANNER_DATABASE__URL, PLANNER_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("PLANNER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let planner_config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        planner_config.validate()?;

        Ok(planner_config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(PlannerError::validation(
                "database.url is required (set PLANNER_DATABASE__URL or config.toml)",
            )
            .into());
        }

        if self.geocoding.api_key.is_empty() {
            return Err(PlannerError::validation(
                "geocoding.api_key is required (set PLANNER_GEOCODING__API_KEY)",
            )
            .into());
        }

        if self.weather.api_key.is_empty() {
            return Err(PlannerError::validation(
                "weather.api_key is required (set PLANNER_WEATHER__API_KEY)",
            )
            .into());
        }

        if self.session.secret.len() < 16 {
            return Err(PlannerError::validation(
                "session.secret must be at least 16 characters",
            )
            .into());
        }

        for (name, base_url) in [
            ("geocoding", &self.geocoding.base_url),
            ("weather", &self.weather.base_url),
            ("places", &self.places.base_url),
        ] {
            if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                return Err(PlannerError::validation(format!(
                    "{name}.base_url must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        for (name, timeout) in [
            ("geocoding", self.geocoding.timeout_seconds),
            ("weather", self.weather.timeout_seconds),
            ("places", self.places.timeout_seconds),
        ] {
            if timeout == 0 || timeout > 300 {
                return Err(PlannerError::validation(format!(
                    "{name}.timeout_seconds must be between 1 and 300"
                ))
                .into());
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::validation(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_config() -> PlannerConfig {
        let mut config = PlannerConfig::default();
        config.database.url = "postgres://localhost/tripplanner".to_string();
        config.geocoding.api_key = "opencage_test_key".to_string();
        config.weather.api_key = "openweather_test_key".to_string();
        config.session.secret = "a-long-enough-test-secret".to_string();
        config
    }

    #[test]
    fn test_default_values() {
        let config = PlannerConfig::default();
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.places.radius_m, 3000);
        assert_eq!(config.logging.level, "info");
        assert!(config.places.api_key.is_none());
        assert!(!config.database.refresh_coordinates_on_start);
    }

    #[test]
    fn test_filled_config_validates() {
        assert!(filled_config().validate().is_ok());
    }

    #[test]
    fn test_missing_database_url_rejected() {
        let mut config = filled_config();
        config.database.url = String::new();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("database.url"));
    }

    #[test]
    fn test_short_session_secret_rejected() {
        let mut config = filled_config();
        config.session.secret = "short".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = filled_config();
        config.logging.level = "verbose".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid log level")
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = filled_config();
        config.weather.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_range_rejected() {
        let mut config = filled_config();
        config.geocoding.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout_seconds must be between")
        );
    }
}
