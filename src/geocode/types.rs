//! Geocode Data Types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One Nominatim search hit. Coordinates arrive as decimal strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl NominatimPlace {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.lat.trim().parse().ok()?,
            longitude: self.lon.trim().parse().ok()?,
        })
    }
}

/// Contents of the coordinate cache file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CacheFile {
    /// Location name -> coordinates.
    Keyed(BTreeMap<String, Coordinates>),
    /// Legacy layout: entries aligned with the location index at write time.
    Positional(Vec<NominatimPlace>),
}
