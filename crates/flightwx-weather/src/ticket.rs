use serde::{Deserialize, Serialize};

use crate::types::LocationDescriptor;

/// A flight ticket row with both airports and their positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub origin_iata_code: String,
    pub destination_iata_code: String,
    pub origin_name: String,
    pub destination_name: String,
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    pub destination_latitude: f64,
    pub destination_longitude: f64,
    pub airline: String,
    pub flight_num: String,
}

impl Ticket {
    /// Coordinate descriptors for (origin, destination).
    pub fn descriptors(&self) -> (LocationDescriptor, LocationDescriptor) {
        (
            LocationDescriptor::coordinates(self.origin_latitude, self.origin_longitude),
            LocationDescriptor::coordinates(
                self.destination_latitude,
                self.destination_longitude,
            ),
        )
    }

    /// Airline code plus flight number, e.g. "4O 104".
    pub fn flight_number(&self) -> String {
        format!("{} {}", self.airline, self.flight_num)
    }
}
