//! Geocode Cache Module
//!
//! Resolves every formatted location in the global index to coordinates and
//! keeps the result in a side-cache file so later runs skip the geocoder.
//!
//! ## Components
//! - **`geocoder`**: the `Geocoder` capability and its Nominatim implementation.
//! - **`cache`**: `GeocodeCache`, the in-memory map plus load/build/persist logic.
//! - **`types`**: coordinate records and the on-disk formats.
//!
//! The cache file is a JSON object keyed by location name. Files written as a
//! positional array (one entry per index slot) are still read, by zipping them
//! against the current index, and are rewritten keyed on the next save.

pub mod cache;
pub mod geocoder;
pub mod types;

pub use cache::GeocodeCache;
pub use geocoder::{Geocoder, NominatimGeocoder};
pub use types::Coordinates;
