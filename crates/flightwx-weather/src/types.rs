use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied, not-yet-resolved identification of a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationDescriptor {
    /// Free-text place name with an optional region/country code
    Place {
        name: String,
        region_code: Option<String>,
    },
    /// Airport identifier (IATA)
    Airport { code: String },
    /// Explicit coordinates, resolved without I/O
    Coordinates { latitude: f64, longitude: f64 },
}

impl LocationDescriptor {
    pub fn place(name: impl Into<String>, region_code: Option<&str>) -> Self {
        Self::Place {
            name: name.into(),
            region_code: region_code.map(str::to_string),
        }
    }

    pub fn airport(code: impl Into<String>) -> Self {
        Self::Airport { code: code.into() }
    }

    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self::Coordinates {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for LocationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Place {
                name,
                region_code: Some(region),
            } => write!(f, "{}, {}", name, region),
            Self::Place { name, .. } => write!(f, "{}", name),
            Self::Airport { code } => write!(f, "airport {}", code),
            Self::Coordinates {
                latitude,
                longitude,
            } => write!(f, "({}, {})", latitude, longitude),
        }
    }
}

/// A validated geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Returns `None` unless latitude is in [-90, 90] and longitude in [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Some(Self {
                latitude,
                longitude,
            })
        } else {
            None
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Fixed-precision key shared by every descriptor that resolves here.
    pub fn cache_key(&self) -> String {
        format!("{:.4}:{:.4}", round4(self.latitude), round4(self.longitude))
    }
}

/// Round to 4 decimals; adding 0.0 folds a negative zero into 0.0.
fn round4(value: f64) -> f64 {
    (value * 1e4).round() / 1e4 + 0.0
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// Opaque provider response, held only until normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeatherPayload(serde_json::Value);

impl RawWeatherPayload {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Normalized current conditions for one location.
///
/// Only built by the normalizer from a validated payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherResult {
    place: String,
    temperature_celsius: f64,
    conditions: String,
}

impl WeatherResult {
    pub(crate) fn new(place: String, temperature_celsius: f64, conditions: String) -> Self {
        Self {
            place,
            temperature_celsius,
            conditions,
        }
    }

    pub fn place(&self) -> &str {
        &self.place
    }

    pub fn temperature_celsius(&self) -> f64 {
        self.temperature_celsius
    }

    pub fn conditions(&self) -> &str {
        &self.conditions
    }
}

/// Modeled failure categories for a single lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Location could not be geocoded
    ResolutionFailed,
    /// Transport/HTTP failure reaching the weather provider
    UpstreamUnavailable,
    /// Provider reachable but the response lacks required fields
    MalformedPayload,
}

impl ErrorKind {
    /// User-friendly message for a failed side.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ResolutionFailed => "Location not found. Check and try again.",
            Self::UpstreamUnavailable => "Weather service unavailable. Please try again later.",
            Self::MalformedPayload => "Weather service returned incomplete data.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ResolutionFailed => "Resolution failed",
            Self::UpstreamUnavailable => "Upstream unavailable",
            Self::MalformedPayload => "Malformed payload",
        };
        f.write_str(label)
    }
}

/// Error raised by a pipeline stage, converted to [`LookupOutcome::Failed`]
/// before it leaves the pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct LookupError {
    pub kind: ErrorKind,
    pub message: String,
}

impl LookupError {
    pub fn resolution_failed(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::ResolutionFailed,
            message: message.into(),
        }
    }

    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::UpstreamUnavailable,
            message: message.into(),
        }
    }

    pub fn malformed_payload(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MalformedPayload,
            message: message.into(),
        }
    }
}

/// Result of one side's pipeline. Serialized with a `status` tag so both
/// sides share one shape whether they succeeded or not.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LookupOutcome {
    Ok(WeatherResult),
    Failed {
        #[serde(rename = "error")]
        kind: ErrorKind,
        message: String,
    },
}

impl LookupOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        match self {
            Self::Ok(result) => Some(result),
            Self::Failed { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Ok(_) => None,
            Self::Failed { kind, .. } => Some(*kind),
        }
    }
}

impl From<Result<WeatherResult, LookupError>> for LookupOutcome {
    fn from(result: Result<WeatherResult, LookupError>) -> Self {
        match result {
            Ok(weather) => Self::Ok(weather),
            Err(LookupError { kind, message }) => Self::Failed { kind, message },
        }
    }
}

/// Which end of the trip a pipeline serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Origin,
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => f.write_str("origin"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Combined result for both ends; always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResponse {
    pub origin: LookupOutcome,
    pub destination: LookupOutcome,
}
