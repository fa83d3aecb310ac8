pub mod config;
pub mod error;

pub use config::{AirportConfig, CacheConfig, Config, ValidationResult, WeatherConfig};
pub use error::{AppError, ConfigError, NetworkError, ReqwestErrorExt};

use anyhow::Result;

/// Initialize logging.
///
/// Logs go to stderr so that stdout carries only report output.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    tracing::info!("FlightWx core initialized");
    Ok(())
}
