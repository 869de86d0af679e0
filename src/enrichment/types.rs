use crate::catalog::Artist;

use serde::Serialize;

/// Display-ready detail for one artist.
#[derive(Debug, Clone, Serialize)]
pub struct ArtistInfo {
    pub artist: Artist,
    /// `"London, UK: 28-01-2020, 30-01-2020"`, one line per location.
    pub concerts: Vec<String>,
    /// Parallel to `concerts`.
    pub coordinates: Vec<LocationPin>,
}

/// A formatted location and its coordinates, when the geocode cache has them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPin {
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
