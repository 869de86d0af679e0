use super::types::{ArtistInfo, LocationPin};
use crate::catalog::format::format_location;
use crate::catalog::{Artist, Catalog, Fetcher, LocationSet, RelationMap, fetch_json};
use crate::dates::strip_marker;
use crate::error::CatalogError;
use crate::geocode::GeocodeCache;

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

const LOCATIONS_RESOURCE: &str = "locations";
const RELATIONS_RESOURCE: &str = "relations";

pub struct EnrichmentCache {
    catalog: Arc<Catalog>,
    fetcher: Arc<dyn Fetcher>,
    geocodes: Arc<GeocodeCache>,
    /// Memoized detail views, keyed by artist id.
    infos: DashMap<u32, Arc<ArtistInfo>>,
    /// One gate per artist; holding it means "enriching this artist".
    in_flight: DashMap<u32, Arc<Mutex<()>>>,
}

impl EnrichmentCache {
    pub fn new(
        catalog: Arc<Catalog>,
        fetcher: Arc<dyn Fetcher>,
        geocodes: Arc<GeocodeCache>,
    ) -> Self {
        Self {
            catalog,
            fetcher,
            geocodes,
            infos: DashMap::new(),
            in_flight: DashMap::new(),
        }
    }

    /// Returns the detail view of an artist, fetching missing sub-resources first.
    ///
    /// # Errors
    /// - `CatalogError::NotFound` for an unknown id.
    /// - `CatalogError::Enrichment` when a sub-resource fetch fails. Whatever
    ///   the other fetch stored is kept.
    pub async fn ensure_and_get(&self, artist_id: u32) -> Result<Arc<ArtistInfo>, CatalogError> {
        let artist = self
            .catalog
            .artist(artist_id)
            .ok_or(CatalogError::NotFound(artist_id))?;

        if let Some(info) = self.memoized(artist_id) {
            return Ok(info);
        }

        let gate = self.in_flight.entry(artist_id).or_default().clone();
        let _guard = gate.lock().await;

        // Another request may have finished while we waited.
        if let Some(info) = self.memoized(artist_id) {
            return Ok(info);
        }

        self.ensure_enriched(artist).await?;
        Ok(self.build_info(artist))
    }

    /// Fetches whichever of the location and relation documents is still
    /// missing, both at once.
    pub async fn ensure_enriched(&self, artist: &Artist) -> Result<(), CatalogError> {
        if artist.locations().is_some() && artist.relations().is_some() {
            return Ok(());
        }

        tracing::info!("Filling detail info for {}...", artist.name);

        let (locations, relations) =
            tokio::join!(self.fill_locations(artist), self.fill_relations(artist));
        locations.and(relations)?;

        tracing::info!("Done filling detail info for {}", artist.name);
        Ok(())
    }

    async fn fill_locations(&self, artist: &Artist) -> Result<(), CatalogError> {
        if artist.locations().is_some() {
            return Ok(());
        }

        let set: LocationSet = fetch_json(self.fetcher.as_ref(), &artist.locations_url)
            .await
            .map_err(|source| {
                tracing::warn!("Locations fetch failed for artist {}: {}", artist.id, source);
                CatalogError::Enrichment {
                    artist_id: artist.id,
                    resource: LOCATIONS_RESOURCE,
                    source,
                }
            })?;

        artist.set_locations(set);
        Ok(())
    }

    async fn fill_relations(&self, artist: &Artist) -> Result<(), CatalogError> {
        if artist.relations().is_some() {
            return Ok(());
        }

        let map: RelationMap = fetch_json(self.fetcher.as_ref(), &artist.relations_url)
            .await
            .map_err(|source| {
                tracing::warn!("Relations fetch failed for artist {}: {}", artist.id, source);
                CatalogError::Enrichment {
                    artist_id: artist.id,
                    resource: RELATIONS_RESOURCE,
                    source,
                }
            })?;

        artist.set_relations(map);
        Ok(())
    }

    /// Derives the detail view from whatever the artist currently holds.
    ///
    /// The result is memoized only once the coordinate cache is ready, so a
    /// view built during startup does not pin missing coordinates forever.
    pub fn build_info(&self, artist: &Artist) -> Arc<ArtistInfo> {
        if let Some(info) = self.memoized(artist.id) {
            return info;
        }

        let relations = artist.relations();
        let mut concerts = Vec::new();
        let mut coordinates = Vec::new();

        for token in artist.location_tokens() {
            let name = format_location(token);
            let dates = relations
                .and_then(|map| map.dates_locations.get(token))
                .map(|dates| strip_marker(&dates.join(", ")))
                .unwrap_or_default();

            concerts.push(format!("{}: {}", name, dates));

            let found = self.geocodes.get(&name);
            coordinates.push(LocationPin {
                name,
                latitude: found.map(|c| c.latitude),
                longitude: found.map(|c| c.longitude),
            });
        }

        let info = Arc::new(ArtistInfo {
            artist: artist.clone(),
            concerts,
            coordinates,
        });

        if self.geocodes.is_ready() {
            self.infos.insert(artist.id, info.clone());
        } else {
            tracing::debug!(
                "Coordinate cache not ready, detail for artist {} not memoized",
                artist.id
            );
        }

        info
    }

    pub fn memoized(&self, artist_id: u32) -> Option<Arc<ArtistInfo>> {
        self.infos.get(&artist_id).map(|entry| entry.value().clone())
    }

    #[cfg(test)]
    pub(crate) fn memoized_count(&self) -> usize {
        self.infos.len()
    }
}
