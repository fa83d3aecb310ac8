//! Flight-level envelope around an [`AggregateResponse`].
//!
//! Modeled lookup failures live inside the report and keep a 200 status.
//! Only an unexpected fault in the lookup tasks becomes a [`ReportError`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};

use crate::aggregator::Aggregator;
use crate::types::{AggregateResponse, LocationDescriptor, LookupOutcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightWeatherReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flight_number: Option<String>,
    pub origin: LookupOutcome,
    pub destination: LookupOutcome,
    pub generated_at: DateTime<Utc>,
}

impl FlightWeatherReport {
    pub fn new(flight_number: Option<String>, response: AggregateResponse) -> Self {
        Self {
            flight_number,
            origin: response.origin,
            destination: response.destination,
            generated_at: Utc::now(),
        }
    }

    /// HTTP-style status for the report; partial failures are still 200.
    pub fn status_code(&self) -> u16 {
        200
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ReportError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Internal(_) => 500,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Internal(_) => "An unexpected error occurred. Please try again.",
        }
    }

    /// JSON body for the error response.
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

/// Build a weather report for a flight's two ends.
///
/// # Errors
///
/// Returns [`ReportError::Internal`] only if a lookup task panicked.
pub async fn flight_report(
    aggregator: &Aggregator,
    flight_number: Option<String>,
    origin: LocationDescriptor,
    destination: LocationDescriptor,
) -> Result<FlightWeatherReport, ReportError> {
    let aggregator = aggregator.clone();
    let task = tokio::spawn(async move { aggregator.aggregate(origin, destination).await });
    finish(flight_number, task).await
}

async fn finish(
    flight_number: Option<String>,
    task: JoinHandle<AggregateResponse>,
) -> Result<FlightWeatherReport, ReportError> {
    match task.await {
        Ok(response) => Ok(FlightWeatherReport::new(flight_number, response)),
        Err(e) => {
            let detail = fault_detail(e);
            tracing::error!("Weather report failed unexpectedly: {}", detail);
            Err(ReportError::Internal(detail))
        }
    }
}

fn fault_detail(error: JoinError) -> String {
    if !error.is_panic() {
        return error.to_string();
    }
    let payload = error.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "lookup task panicked".to_string()
    }
}
