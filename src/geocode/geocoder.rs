use super::types::{Coordinates, NominatimPlace};
use crate::catalog::format::to_uri_component;
use crate::catalog::{Fetcher, fetch_json};
use crate::error::CatalogError;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves a formatted location name to its best-match coordinates.
    async fn locate(&self, location: &str) -> Result<Coordinates, CatalogError>;
}

/// Geocoder backed by a Nominatim `search` endpoint.
///
/// Requests are spaced at least `interval` apart to respect the public
/// instance's usage policy.
pub struct NominatimGeocoder {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: &str, interval: Duration) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            interval,
            last_request: Mutex::new(None),
        }
    }

    pub fn search_url(&self, location: &str) -> String {
        format!(
            "{}/search?q={}&format=json&limit=1&accept-language=en",
            self.base_url,
            to_uri_component(location)
        )
    }

    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.interval;
            if ready_at > Instant::now() {
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn locate(&self, location: &str) -> Result<Coordinates, CatalogError> {
        self.throttle().await;

        let url = self.search_url(location);
        let places: Vec<NominatimPlace> = fetch_json(self.fetcher.as_ref(), &url)
            .await
            .map_err(|e| CatalogError::GeocodeFatal {
                location: location.to_string(),
                reason: e.to_string(),
            })?;

        let place = places.first().ok_or_else(|| CatalogError::GeocodeFatal {
            location: location.to_string(),
            reason: "no results".to_string(),
        })?;

        tracing::debug!("Geocoded {} -> {}", location, place.display_name);

        place.coordinates().ok_or_else(|| CatalogError::GeocodeFatal {
            location: location.to_string(),
            reason: format!("unparsable coordinates ({}, {})", place.lat, place.lon),
        })
    }
}
