//! Dual-location fan-out/fan-in.
//!
//! Each side runs resolve → cache → fetch → normalize in its own task. The
//! two tasks are joined once and their outcomes merged by side, so a failure
//! on one side never touches the other.

use std::sync::Arc;

use flightwx_core::{AppError, Config, ConfigError, ReqwestErrorExt};
use tokio::task::JoinError;
use tracing::instrument;

use crate::airports::AirportDirectory;
use crate::cache::WeatherCache;
use crate::geocode::Geocoder;
use crate::normalize::normalize;
use crate::provider::{build_http_client, WeatherClient};
use crate::resolver::LocationResolver;
use crate::types::{
    AggregateResponse, LocationDescriptor, LookupError, LookupOutcome, Side, WeatherResult,
};

/// Cheap to clone; clones share the resolver, client and cache.
#[derive(Debug, Clone)]
pub struct Aggregator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    resolver: LocationResolver,
    client: WeatherClient,
    cache: Arc<WeatherCache>,
}

impl Aggregator {
    pub fn new(
        resolver: LocationResolver,
        client: WeatherClient,
        cache: Arc<WeatherCache>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                resolver,
                client,
                cache,
            }),
        }
    }

    /// Wire up HTTP clients, airport table and cache from configuration.
    ///
    /// Fails on a config with validation errors or if the HTTP client can't be built.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        let http = build_http_client(config.weather.timeout())
            .map_err(|e| AppError::Network(e.into_network_error()))?;
        let airports = Arc::new(AirportDirectory::from_config(&config.airports));
        let geocoder = Geocoder::new(
            http.clone(),
            config.weather.geocoding_url.clone(),
            config.weather.api_key.clone(),
        );
        let client = WeatherClient::new(
            http,
            config.weather.api_url.clone(),
            config.weather.api_key.clone(),
        );
        let cache = Arc::new(WeatherCache::with_ttl(config.cache.ttl()));

        tracing::info!(
            "Weather aggregator ready ({} airports, cache ttl {:?})",
            airports.len(),
            cache.ttl()
        );
        Ok(Self::new(LocationResolver::new(geocoder, airports), client, cache))
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.inner.cache
    }

    /// Look up both ends concurrently. Never fails: each side is `Ok` or
    /// `Failed` on its own. A panicking side is re-raised here.
    pub async fn aggregate(
        &self,
        origin: LocationDescriptor,
        destination: LocationDescriptor,
    ) -> AggregateResponse {
        let origin_task = tokio::spawn({
            let this = self.clone();
            async move { this.lookup(Side::Origin, &origin).await }
        });
        let destination_task = tokio::spawn({
            let this = self.clone();
            async move { this.lookup(Side::Destination, &destination).await }
        });

        let (origin, destination) = tokio::join!(origin_task, destination_task);

        AggregateResponse {
            origin: joined(Side::Origin, origin),
            destination: joined(Side::Destination, destination),
        }
    }

    /// Run one side's pipeline to a terminal outcome.
    #[instrument(skip(self, descriptor), fields(descriptor = %descriptor))]
    pub async fn lookup(&self, side: Side, descriptor: &LocationDescriptor) -> LookupOutcome {
        let outcome = LookupOutcome::from(self.run_pipeline(descriptor).await);
        if let LookupOutcome::Failed { kind, message } = &outcome {
            tracing::warn!("{} lookup failed ({}): {}", side, kind, message);
        }
        outcome
    }

    async fn run_pipeline(
        &self,
        descriptor: &LocationDescriptor,
    ) -> Result<WeatherResult, LookupError> {
        let coordinate = self.inner.resolver.resolve(descriptor).await?;
        let key = coordinate.cache_key();

        if let Some(cached) = self.inner.cache.get(&key) {
            tracing::debug!("Weather cache hit for {}", key);
            return Ok(cached);
        }
        tracing::debug!("Weather cache miss for {}", key);

        let payload = self.inner.client.fetch(coordinate).await?;
        let result = normalize(&payload)?;

        self.inner.cache.put(key, result.clone());
        Ok(result)
    }
}

pub(crate) fn joined(side: Side, result: Result<LookupOutcome, JoinError>) -> LookupOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => {
            tracing::error!("{} lookup task was cancelled: {}", side, e);
            std::panic::resume_unwind(Box::new(format!("{} lookup task cancelled", side)))
        }
    }
}
