//! Read-only airport table supplied at construction time.

use std::collections::HashMap;

use flightwx_core::AirportConfig;

use crate::ticket::Ticket;
use crate::types::Coordinate;

/// A statically known airport.
#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub code: String,
    pub name: String,
    pub coordinate: Coordinate,
}

/// Airport code → airport lookup, case-insensitive on the code.
#[derive(Debug, Clone, Default)]
pub struct AirportDirectory {
    airports: HashMap<String, Airport>,
}

impl AirportDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from config entries. Entries with out-of-range coordinates are
    /// skipped with a warning.
    pub fn from_config(entries: &[AirportConfig]) -> Self {
        entries
            .iter()
            .filter_map(|entry| {
                match Coordinate::new(entry.latitude, entry.longitude) {
                    Some(coordinate) => Some(Airport {
                        code: entry.code.clone(),
                        name: entry.name.clone(),
                        coordinate,
                    }),
                    None => {
                        tracing::warn!(
                            "Skipping airport {}: coordinates out of range",
                            entry.code
                        );
                        None
                    }
                }
            })
            .collect()
    }

    /// Build from ticket rows. The first row mentioning a code wins.
    pub fn from_tickets(tickets: &[Ticket]) -> Self {
        let mut directory = Self::new();
        for ticket in tickets {
            let ends = [
                (
                    &ticket.origin_iata_code,
                    &ticket.origin_name,
                    ticket.origin_latitude,
                    ticket.origin_longitude,
                ),
                (
                    &ticket.destination_iata_code,
                    &ticket.destination_name,
                    ticket.destination_latitude,
                    ticket.destination_longitude,
                ),
            ];
            for (code, name, latitude, longitude) in ends {
                let key = normalize_code(code);
                if directory.airports.contains_key(&key) {
                    continue;
                }
                if let Some(coordinate) = Coordinate::new(latitude, longitude) {
                    directory.airports.insert(
                        key,
                        Airport {
                            code: code.clone(),
                            name: name.clone(),
                            coordinate,
                        },
                    );
                }
            }
        }
        directory
    }

    pub fn get(&self, code: &str) -> Option<&Airport> {
        self.airports.get(&normalize_code(code))
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl FromIterator<Airport> for AirportDirectory {
    fn from_iter<I: IntoIterator<Item = Airport>>(iter: I) -> Self {
        let airports = iter
            .into_iter()
            .map(|airport| (normalize_code(&airport.code), airport))
            .collect();
        Self { airports }
    }
}

fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}
