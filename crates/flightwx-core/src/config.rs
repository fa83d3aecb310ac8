use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_GEOCODING_URL: &str = "https://api.openweathermap.org/geo/1.0/direct";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// In-memory weather cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Known airports, resolved without a geocoding call
    #[serde(default)]
    pub airports: Vec<AirportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Current-weather endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Direct geocoding endpoint
    #[serde(default = "default_geocoding_url")]
    pub geocoding_url: String,

    /// Provider API key (overridden at load time by `OPENWEATHER_API_KEY`)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_WEATHER_URL.to_string()
}

fn default_geocoding_url() -> String {
    DEFAULT_GEOCODING_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            geocoding_url: default_geocoding_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live for cached lookups, in minutes (default: 10)
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

fn default_ttl_minutes() -> u64 {
    10
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_minutes.saturating_mul(60))
    }
}

/// A statically known airport (IATA code, display name, position).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportConfig {
    pub code: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, writing defaults if it doesn't exist.
    ///
    /// The environment API key is applied after any write, so it never lands on disk.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let contents =
                std::fs::read_to_string(config_path).context("Failed to read config file")?;
            toml::from_str::<Config>(&contents)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            config.weather.api_key = Some(key);
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated(config_path: Option<&Path>) -> Result<(Self, ValidationResult)> {
        let config = match config_path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.api_url, "weather.api_url", &mut result);
        self.validate_url(
            &self.weather.geocoding_url,
            "weather.geocoding_url",
            &mut result,
        );

        if self.weather.timeout_secs == 0 {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        } else if self.weather.timeout_secs > 60 {
            result.add_warning(
                "weather.timeout_secs",
                "Timeout is more than a minute; a stalled provider will hold the report",
            );
        }

        if self.weather.api_key.as_deref().map_or(true, str::is_empty) {
            result.add_warning(
                "weather.api_key",
                format!("No API key configured (set {})", API_KEY_ENV),
            );
        }

        if self.cache.ttl_minutes == 0 {
            result.add_warning("cache.ttl_minutes", "Weather caching disabled (0 minutes)");
        }

        for (i, airport) in self.airports.iter().enumerate() {
            let field = format!("airports[{}]", i);
            if airport.code.trim().is_empty() {
                result.add_error(&field, "Airport code must not be empty");
            }
            if !(-90.0..=90.0).contains(&airport.latitude) {
                result.add_error(
                    &field,
                    format!("Latitude out of range: {}", airport.latitude),
                );
            }
            if !(-180.0..=180.0).contains(&airport.longitude) {
                result.add_error(
                    &field,
                    format!("Longitude out of range: {}", airport.longitude),
                );
            }
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("flightwx");

        Ok(config_dir.join("config.toml"))
    }
}
