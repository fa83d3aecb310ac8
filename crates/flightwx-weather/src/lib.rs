//! Weather lookups for both ends of a trip.
//!
//! Resolves origin and destination descriptors to coordinates, fetches
//! current conditions for both concurrently from the upstream provider, and
//! merges them into one response with per-side failures. Results are kept in
//! a short-lived in-memory cache keyed by coordinate.

pub mod aggregator;
pub mod airports;
pub mod cache;
pub mod geocode;
pub mod normalize;
pub mod provider;
pub mod report;
pub mod resolver;
pub mod ticket;
pub mod types;

pub use aggregator::Aggregator;
pub use airports::{Airport, AirportDirectory};
pub use cache::{WeatherCache, DEFAULT_TTL};
pub use geocode::{GeocodeCandidate, Geocoder};
pub use normalize::normalize;
pub use provider::{build_http_client, WeatherClient};
pub use report::{flight_report, FlightWeatherReport, ReportError};
pub use resolver::LocationResolver;
pub use ticket::Ticket;
pub use types::*;
