use crate::airline::Airline;
use crate::airport::{Airport, AirportId};
use std::collections::HashMap;
use std::io;
use serde::Deserialize;

/// Read-only airport/airline reference data, loaded once at startup and
/// passed by reference into the calculator. Tests substitute a small fixed
/// table built with [`ReferenceData::new`].
pub struct ReferenceData {
    airports: HashMap<AirportId, Airport>,
    airlines: Vec<Airline>,
}

impl ReferenceData {
    pub fn new(airports: Vec<Airport>, mut airlines: Vec<Airline>) -> ReferenceData {
        airlines.sort_by(|a, b| a.name.cmp(&b.name));
        let airports = airports
            .into_iter()
            .map(|a| (a.code.clone(), a))
            .collect::<HashMap<AirportId, Airport>>();
        ReferenceData { airports, airlines }
    }

    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        #[derive(Deserialize)]
        struct RawData {
            airports: Vec<Airport>,
            airlines: Vec<Airline>,
        }
        let raw: RawData = serde_json::from_str(&data)?;

        Ok(ReferenceData::new(raw.airports, raw.airlines))
    }

    pub fn airport(&self, code: &str) -> Option<&Airport> {
        self.airports.get(code)
    }

    pub fn airline(&self, code: &str) -> Option<&Airline> {
        self.airlines.iter().find(|a| a.code.eq_ignore_ascii_case(code))
    }

    /// Airports sorted by code, for listing.
    pub fn airports(&self) -> Vec<&Airport> {
        let mut all = self.airports.values().collect::<Vec<_>>();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }

    pub fn airlines(&self) -> &[Airline] {
        &self.airlines
    }
}
