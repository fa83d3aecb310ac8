//! Location resolution: descriptor → coordinate.

use std::sync::Arc;

use tracing::instrument;

use crate::airports::AirportDirectory;
use crate::geocode::Geocoder;
use crate::types::{Coordinate, LocationDescriptor, LookupError};

/// Resolves descriptors using explicit coordinates, the injected airport
/// table, and finally the geocoding provider. One attempt per call.
#[derive(Debug, Clone)]
pub struct LocationResolver {
    geocoder: Geocoder,
    airports: Arc<AirportDirectory>,
}

impl LocationResolver {
    pub fn new(geocoder: Geocoder, airports: Arc<AirportDirectory>) -> Self {
        Self { geocoder, airports }
    }

    #[instrument(skip(self, descriptor), fields(descriptor = %descriptor), level = "debug")]
    pub async fn resolve(
        &self,
        descriptor: &LocationDescriptor,
    ) -> Result<Coordinate, LookupError> {
        match descriptor {
            LocationDescriptor::Coordinates {
                latitude,
                longitude,
            } => Coordinate::new(*latitude, *longitude).ok_or_else(|| {
                LookupError::resolution_failed(format!(
                    "Coordinates out of range: {}",
                    descriptor
                ))
            }),
            LocationDescriptor::Airport { code } => {
                if let Some(airport) = self.airports.get(code) {
                    tracing::debug!("Resolved {} from airport table ({})", code, airport.name);
                    return Ok(airport.coordinate);
                }
                self.geocode(code.trim(), descriptor).await
            }
            LocationDescriptor::Place { name, region_code } => {
                let query = match region_code.as_deref().map(str::trim) {
                    Some(region) if !region.is_empty() => format!("{},{}", name.trim(), region),
                    _ => name.trim().to_string(),
                };
                self.geocode(&query, descriptor).await
            }
        }
    }

    async fn geocode(
        &self,
        query: &str,
        descriptor: &LocationDescriptor,
    ) -> Result<Coordinate, LookupError> {
        if query.is_empty() {
            return Err(LookupError::resolution_failed(format!(
                "Empty location query for {:?}",
                descriptor
            )));
        }

        let candidates = self.geocoder.search(query).await.map_err(|e| {
            LookupError::resolution_failed(format!("Geocoding {} failed: {}", descriptor, e))
        })?;

        let first = candidates.into_iter().next().ok_or_else(|| {
            LookupError::resolution_failed(format!("No location found for {}", descriptor))
        })?;

        Coordinate::new(first.lat, first.lon).ok_or_else(|| {
            LookupError::resolution_failed(format!(
                "Geocoding {} returned invalid coordinates ({}, {})",
                descriptor, first.lat, first.lon
            ))
        })
    }
}
