//! Extraction of place, temperature and conditions from a provider payload.

use serde::Deserialize;

use crate::types::{LookupError, RawWeatherPayload, WeatherResult};

#[derive(Debug, Deserialize)]
struct ProviderWeather {
    name: String,
    main: ProviderMain,
    weather: Vec<ProviderCondition>,
}

#[derive(Debug, Deserialize)]
struct ProviderMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ProviderCondition {
    description: String,
}

/// Build a [`WeatherResult`] from `payload`.
///
/// Fails with `MalformedPayload` when the place name, the numeric `main.temp`
/// or a first `weather` entry with a description is missing.
pub fn normalize(payload: &RawWeatherPayload) -> Result<WeatherResult, LookupError> {
    let parsed = ProviderWeather::deserialize(payload.as_value()).map_err(|e| {
        LookupError::malformed_payload(format!("Unexpected weather payload: {}", e))
    })?;

    let place = parsed.name.trim();
    if place.is_empty() {
        return Err(LookupError::malformed_payload("Weather payload has no place name"));
    }

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| LookupError::malformed_payload("Weather payload has no conditions"))?;
    if condition.description.trim().is_empty() {
        return Err(LookupError::malformed_payload(
            "Weather payload condition has no description",
        ));
    }

    Ok(WeatherResult::new(
        place.to_string(),
        parsed.main.temp,
        condition.description,
    ))
}
