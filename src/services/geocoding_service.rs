use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("no coordinates found for '{0}'")]
    NotFound(String),
    #[error("geocoder unavailable: {0}")]
    Unavailable(String),
}

/// Resolves a formatted address line to coordinates.
pub trait Geocoder {
    fn lookup(&self, address: &str) -> Result<Coordinates, GeocodeError>;
}

/// Offline geocoder backed by a fixed address → coordinates table.
#[derive(Debug, Clone, Default)]
pub struct GazetteerGeocoder {
    entries: HashMap<String, Coordinates>,
}

impl GazetteerGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON object mapping address lines to `{latitude, longitude}`.
    pub fn from_json(json: &str) -> Result<Self, GeocodeError> {
        let raw: HashMap<String, Coordinates> = serde_json::from_str(json)
            .map_err(|e| GeocodeError::Unavailable(format!("invalid gazetteer: {e}")))?;

        let mut gazetteer = Self::new();
        for (address, coordinates) in raw {
            gazetteer.insert(&address, coordinates);
        }
        Ok(gazetteer)
    }

    pub fn insert(&mut self, address: &str, coordinates: Coordinates) {
        self.entries.insert(normalize(address), coordinates);
    }
}

impl Geocoder for GazetteerGeocoder {
    fn lookup(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        let key = normalize(address);
        debug!("Geocoding '{}'", key);
        self.entries
            .get(&key)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound(address.trim().to_string()))
    }
}

fn normalize(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_spacing() {
        let gazetteer = GazetteerGeocoder::from_json(
            r#"{ "KG 7 Ave 12 00000 Kigali": { "latitude": -1.9441, "longitude": 30.0619 } }"#,
        )
        .unwrap();

        let found = gazetteer.lookup("kg 7 ave  12 00000 KIGALI").unwrap();
        assert_eq!(found.latitude, -1.9441);
        assert_eq!(found.longitude, 30.0619);
    }

    #[test]
    fn unknown_address_is_not_found() {
        let gazetteer = GazetteerGeocoder::new();
        assert!(matches!(
            gazetteer.lookup("Nowhere 1"),
            Err(GeocodeError::NotFound(a)) if a == "Nowhere 1"
        ));
    }

    #[test]
    fn malformed_table_is_rejected() {
        assert!(GazetteerGeocoder::from_json("[1, 2]").is_err());
    }
}
