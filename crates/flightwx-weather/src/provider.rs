//! Current-weather client for the upstream provider.

use flightwx_core::{NetworkError, ReqwestErrorExt};
use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use crate::types::{Coordinate, LookupError, RawWeatherPayload};

const USER_AGENT: &str = "FlightWx/0.1.0";

/// Build the HTTP client shared by the geocoder and the weather client.
/// Every request made through it is bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
}

/// Issues one current-weather request per call; callers own concurrency.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherClient {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Fetch raw current conditions (metric units) for `coordinate`.
    #[instrument(skip(self, coordinate), fields(coordinate = %coordinate), level = "debug")]
    pub async fn fetch(&self, coordinate: Coordinate) -> Result<RawWeatherPayload, LookupError> {
        let mut request = self.client.get(&self.base_url).query(&[
            ("lat", coordinate.latitude().to_string()),
            ("lon", coordinate.longitude().to_string()),
            ("units", "metric".to_string()),
        ]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("appid", key.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| unavailable(coordinate, e.into_network_error()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(unavailable(
                coordinate,
                NetworkError::ServerError {
                    status: status.as_u16(),
                    message: text,
                },
            ));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            unavailable(coordinate, NetworkError::InvalidResponse(e.to_string()))
        })?;

        Ok(RawWeatherPayload::new(body))
    }
}

fn unavailable(coordinate: Coordinate, error: NetworkError) -> LookupError {
    LookupError::upstream_unavailable(format!(
        "Weather request for {} failed: {}",
        coordinate, error
    ))
}
