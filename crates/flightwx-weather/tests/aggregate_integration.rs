//! Integration tests for the dual-location aggregator using wiremock.
//!
//! One mock server plays both upstreams: `/geo` for geocoding and
//! `/weather` for current conditions.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use flightwx_weather::{
    build_http_client, flight_report, Aggregator, Airport, AirportDirectory, Coordinate,
    ErrorKind, Geocoder, LocationDescriptor, LocationResolver, LookupOutcome, Side, Ticket,
    WeatherCache, WeatherClient,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MEX_LAT: &str = "19.4363";
const MEX_LON: &str = "-99.0721";
const MTY_LAT: &str = "25.7785";

/// Helper to create a provider current-weather body
fn weather_body(place: &str, temp: f64, description: &str) -> serde_json::Value {
    serde_json::json!({
        "name": place,
        "main": { "temp": temp, "humidity": 30 },
        "weather": [{ "id": 800, "main": "Clear", "description": description }]
    })
}

fn mex_weather() -> serde_json::Value {
    weather_body("Ciudad de Mexico", 22.5, "clear sky")
}

fn mty_weather() -> serde_json::Value {
    weather_body("Monterrey", 30.1, "few clouds")
}

fn airports() -> AirportDirectory {
    [
        Airport {
            code: "MEX".to_string(),
            name: "Ciudad de Mexico".to_string(),
            coordinate: Coordinate::new(19.4363, -99.0721).unwrap(),
        },
        Airport {
            code: "MTY".to_string(),
            name: "Monterrey".to_string(),
            coordinate: Coordinate::new(25.7785, -100.107).unwrap(),
        },
    ]
    .into_iter()
    .collect()
}

fn aggregator(server: &MockServer) -> Aggregator {
    let http = build_http_client(Duration::from_secs(5)).unwrap();
    let resolver = LocationResolver::new(
        Geocoder::new(http.clone(), format!("{}/geo", server.uri()), None),
        Arc::new(airports()),
    );
    let client = WeatherClient::new(http, format!("{}/weather", server.uri()), None);
    Aggregator::new(resolver, client, Arc::new(WeatherCache::new()))
}

async fn mount_weather(server: &MockServer, lat: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", lat))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_airport_scenario_mex() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", MEX_LAT))
        .and(query_param("lon", MEX_LON))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mex_weather()))
        .mount(&server)
        .await;
    mount_weather(&server, MTY_LAT, mty_weather()).await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let response = aggregator(&server)
        .aggregate(LocationDescriptor::airport("MEX"), LocationDescriptor::airport("MTY"))
        .await;

    let origin = response.origin.result().unwrap();
    assert_eq!(origin.place(), "Ciudad de Mexico");
    assert_eq!(origin.temperature_celsius(), 22.5);
    assert_eq!(origin.conditions(), "clear sky");
    assert_eq!(response.destination.result().unwrap().place(), "Monterrey");
}

#[tokio::test]
async fn test_unknown_place_fails_only_its_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .and(query_param("q", "Nowhereville,ZZ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;
    mount_weather(&server, MTY_LAT, mty_weather()).await;

    let response = aggregator(&server)
        .aggregate(
            LocationDescriptor::place("Nowhereville", Some("ZZ")),
            LocationDescriptor::airport("MTY"),
        )
        .await;

    match &response.origin {
        LookupOutcome::Failed { kind, message } => {
            assert_eq!(*kind, ErrorKind::ResolutionFailed);
            assert!(message.contains("Nowhereville"));
        }
        other => panic!("expected resolution failure, got {:?}", other),
    }
    assert_eq!(response.destination.result().unwrap().place(), "Monterrey");
}

#[tokio::test]
async fn test_provider_503_is_upstream_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let response = aggregator(&server)
        .aggregate(
            LocationDescriptor::airport("MEX"),
            LocationDescriptor::coordinates(40.4168, -3.7038),
        )
        .await;

    assert_eq!(response.origin.error_kind(), Some(ErrorKind::UpstreamUnavailable));
    assert_eq!(
        response.destination.error_kind(),
        Some(ErrorKind::UpstreamUnavailable)
    );
}

#[tokio::test]
async fn test_origin_fetch_failure_leaves_destination_unchanged() {
    let healthy = MockServer::start().await;
    mount_weather(&healthy, MEX_LAT, mex_weather()).await;
    mount_weather(&healthy, MTY_LAT, mty_weather()).await;
    let baseline = aggregator(&healthy)
        .aggregate(LocationDescriptor::airport("MEX"), LocationDescriptor::airport("MTY"))
        .await;

    let degraded = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", MEX_LAT))
        .respond_with(ResponseTemplate::new(500))
        .mount(&degraded)
        .await;
    mount_weather(&degraded, MTY_LAT, mty_weather()).await;
    let response = aggregator(&degraded)
        .aggregate(LocationDescriptor::airport("MEX"), LocationDescriptor::airport("MTY"))
        .await;

    assert!(baseline.origin.is_ok());
    assert_eq!(response.origin.error_kind(), Some(ErrorKind::UpstreamUnavailable));
    assert_eq!(response.destination, baseline.destination);
}

#[tokio::test]
async fn test_malformed_payload_side() {
    let server = MockServer::start().await;
    mount_weather(
        &server,
        MEX_LAT,
        serde_json::json!({ "name": "Ciudad de Mexico", "main": {}, "weather": [] }),
    )
    .await;
    mount_weather(&server, MTY_LAT, mty_weather()).await;

    let response = aggregator(&server)
        .aggregate(LocationDescriptor::airport("MEX"), LocationDescriptor::airport("MTY"))
        .await;

    assert_eq!(response.origin.error_kind(), Some(ErrorKind::MalformedPayload));
    assert!(response.destination.is_ok());
}

#[tokio::test]
async fn test_repeated_aggregate_fetches_once_per_side() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", MEX_LAT))
        .respond_with(ResponseTemplate::new(200).set_body_json(mex_weather()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", MTY_LAT))
        .respond_with(ResponseTemplate::new(200).set_body_json(mty_weather()))
        .expect(1)
        .mount(&server)
        .await;
    let aggregator = aggregator(&server);

    let first = aggregator
        .aggregate(LocationDescriptor::airport("MEX"), LocationDescriptor::airport("MTY"))
        .await;
    let second = aggregator
        .aggregate(LocationDescriptor::airport("MEX"), LocationDescriptor::airport("MTY"))
        .await;

    assert_eq!(first, second);
    server.verify().await;
}

#[tokio::test]
async fn test_descriptors_resolving_to_same_coordinate_share_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", MEX_LAT))
        .respond_with(ResponseTemplate::new(200).set_body_json(mex_weather()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo"))
        .and(query_param("q", "Ciudad de Mexico,MX"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "name": "Mexico City", "lat": 19.4363, "lon": -99.0721 }
        ])))
        .mount(&server)
        .await;
    let aggregator = aggregator(&server);

    let by_code = aggregator
        .lookup(
            Side::Origin,
            &LocationDescriptor::airport("MEX"),
        )
        .await;
    let by_name = aggregator
        .lookup(
            Side::Destination,
            &LocationDescriptor::place("Ciudad de Mexico", Some("MX")),
        )
        .await;
    let by_coords = aggregator
        .lookup(
            Side::Origin,
            &LocationDescriptor::coordinates(19.4363, -99.0721),
        )
        .await;

    assert_eq!(by_code, by_name);
    assert_eq!(by_code, by_coords);
    assert_eq!(aggregator.cache().len(), 1);
    server.verify().await;
}

#[tokio::test]
async fn test_flight_report_from_ticket() {
    let server = MockServer::start().await;
    mount_weather(&server, "19.3371", weather_body("Toluca", 14.0, "light rain")).await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", MTY_LAT))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let ticket = Ticket {
        origin_iata_code: "TLC".to_string(),
        destination_iata_code: "MTY".to_string(),
        origin_name: "Licenciado Adolfo Lopez Mateos International Airport".to_string(),
        destination_name: "Monterrey International Airport".to_string(),
        origin_latitude: 19.3371,
        origin_longitude: -99.566,
        destination_latitude: 25.7785,
        destination_longitude: -100.107,
        airline: "4O".to_string(),
        flight_num: "104".to_string(),
    };
    let (origin, destination) = ticket.descriptors();

    let report = flight_report(
        &aggregator(&server),
        Some(ticket.flight_number()),
        origin,
        destination,
    )
    .await
    .unwrap();

    assert_eq!(report.status_code(), 200);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["flightNumber"], "4O 104");
    assert_eq!(
        json["origin"],
        serde_json::json!({
            "status": "ok",
            "place": "Toluca",
            "temperatureCelsius": 14.0,
            "conditions": "light rain"
        })
    );
    assert_eq!(json["destination"]["status"], "failed");
    assert_eq!(json["destination"]["error"], "upstream_unavailable");
}
