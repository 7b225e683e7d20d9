//! # Point-of-Presence Directory
//!
//! The target network publishes a JSON array of its edge sites, keyed by a
//! short uppercase IATA-style code. The directory is loaded once before the
//! probe stage and is read-only afterwards, so workers share it behind an
//! `Arc` with no further synchronization.

use std::collections::HashMap;

use serde::Deserialize;

/// One edge site as published by the network's location feed.
#[derive(Clone, Debug, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub cca2: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub city: String,
}

/// Read-only map from PoP code to its location record.
#[derive(Clone, Debug, Default)]
pub struct LocationDirectory {
    by_code: HashMap<String, Location>,
}

impl LocationDirectory {
    pub fn from_locations(locations: Vec<Location>) -> Self {
        let by_code = locations
            .into_iter()
            .map(|loc| (loc.iata.clone(), loc))
            .collect();
        Self { by_code }
    }

    pub fn get(&self, code: &str) -> Option<&Location> {
        self.by_code.get(code)
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }
}
