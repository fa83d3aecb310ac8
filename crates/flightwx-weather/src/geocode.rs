//! Forward geocoding: turn a place name or code into candidate positions.
//! Speaks the OpenWeatherMap direct-geocoding shape: `[{ name, lat, lon }]`.

use flightwx_core::{NetworkError, ReqwestErrorExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

const CANDIDATE_LIMIT: &str = "5";

/// One geocoding match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodeCandidate {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl Geocoder {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Look up `query`, returning candidates in provider order.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str) -> Result<Vec<GeocodeCandidate>, NetworkError> {
        let mut request = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("limit", CANDIDATE_LIMIT)]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("appid", key.as_str())]);
        }

        let response = request.send().await.map_err(|e| e.into_network_error())?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(NetworkError::ServerError {
                status: status.as_u16(),
                message: text,
            });
        }

        let candidates: Vec<GeocodeCandidate> = response
            .json()
            .await
            .map_err(|e| NetworkError::InvalidResponse(e.to_string()))?;

        tracing::debug!("Geocoding {:?} returned {} candidates", query, candidates.len());
        Ok(candidates)
    }
}
