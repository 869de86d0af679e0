//! Enrichment Module Tests
//!
//! ## Test Scopes
//! - **Memoization**: repeated requests do not refetch.
//! - **Single-flight**: concurrent first requests share one fetch.
//! - **Partial failure**: a failed half is retried alone on the next request.
//! - **Derived info**: summary lines and coordinate pins.

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, SortedIndex};
    use crate::enrichment::{EnrichmentCache, LocationPin};
    use crate::error::CatalogError;
    use crate::geocode::{Coordinates, GeocodeCache};
    use crate::test_support::{
        StaticFetcher, fixture_artists, fixture_catalog, fixture_fetcher, locations_url,
        relation_url,
    };
    use std::sync::Arc;
    use std::time::Duration;

    fn ready_geocodes() -> Arc<GeocodeCache> {
        Arc::new(GeocodeCache::preloaded(
            "unused-coordinates.json",
            [(
                "London, UK".to_string(),
                Coordinates {
                    latitude: 51.5,
                    longitude: -0.12,
                },
            )],
        ))
    }

    fn cold_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::new(
            fixture_artists(),
            SortedIndex::new(),
            SortedIndex::new(),
        ))
    }

    fn enrichment(catalog: Arc<Catalog>, fetcher: Arc<StaticFetcher>) -> EnrichmentCache {
        EnrichmentCache::new(catalog, fetcher, ready_geocodes())
    }

    // ============================================================
    // MEMOIZATION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_second_request_is_served_from_memo() {
        let fetcher = Arc::new(fixture_fetcher());
        let cache = enrichment(Arc::new(fixture_catalog()), fetcher.clone());

        let first = cache.ensure_and_get(1).await.unwrap();
        let second = cache.ensure_and_get(1).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(fetcher.calls(&relation_url(1)), 1);
        // Locations were already stored by ingestion.
        assert_eq!(fetcher.calls(&locations_url(1)), 0);
        assert_eq!(cache.memoized_count(), 1);
    }

    #[tokio::test]
    async fn test_cold_artist_fetches_both_resources_once() {
        let fetcher = Arc::new(fixture_fetcher());
        let cache = enrichment(cold_catalog(), fetcher.clone());

        cache.ensure_and_get(2).await.unwrap();
        cache.ensure_and_get(2).await.unwrap();

        assert_eq!(fetcher.calls(&locations_url(2)), 1);
        assert_eq!(fetcher.calls(&relation_url(2)), 1);
    }

    #[tokio::test]
    async fn test_not_memoized_until_coordinates_ready() {
        let fetcher = Arc::new(fixture_fetcher());
        let geocodes = Arc::new(GeocodeCache::new("unused-coordinates.json"));
        let cache = EnrichmentCache::new(Arc::new(fixture_catalog()), fetcher.clone(), geocodes);

        cache.ensure_and_get(1).await.unwrap();
        cache.ensure_and_get(1).await.unwrap();

        assert_eq!(cache.memoized_count(), 0);
        // The stored sub-resource still prevents a second fetch.
        assert_eq!(fetcher.calls(&relation_url(1)), 1);
    }

    #[tokio::test]
    async fn test_unknown_artist_is_not_found() {
        let fetcher = Arc::new(fixture_fetcher());
        let cache = enrichment(Arc::new(fixture_catalog()), fetcher.clone());

        let result = cache.ensure_and_get(99).await;

        assert!(matches!(result, Err(CatalogError::NotFound(99))));
        assert_eq!(fetcher.total_calls(), 0);
    }

    // ============================================================
    // SINGLE-FLIGHT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_concurrent_requests_share_one_fetch() {
        let fetcher = Arc::new(fixture_fetcher().with_latency(Duration::from_millis(50)));
        let cache = enrichment(cold_catalog(), fetcher.clone());

        let (a, b) = tokio::join!(cache.ensure_and_get(3), cache.ensure_and_get(3));

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(fetcher.calls(&locations_url(3)), 1);
        assert_eq!(fetcher.calls(&relation_url(3)), 1);
    }

    #[tokio::test]
    async fn test_concurrent_requests_from_spawned_tasks() {
        let fetcher = Arc::new(fixture_fetcher().with_latency(Duration::from_millis(30)));
        let cache = Arc::new(enrichment(cold_catalog(), fetcher.clone()));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.ensure_and_get(4).await.map(|_| ()) })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(fetcher.calls(&locations_url(4)), 1);
        assert_eq!(fetcher.calls(&relation_url(4)), 1);
    }

    // ============================================================
    // PARTIAL FAILURE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_failed_half_is_retried_alone() {
        let fetcher = Arc::new(fixture_fetcher());
        fetcher.fail(&relation_url(3));
        let catalog = cold_catalog();
        let cache = enrichment(catalog.clone(), fetcher.clone());

        let result = cache.ensure_and_get(3).await;

        match result {
            Err(CatalogError::Enrichment { resource, artist_id, .. }) => {
                assert_eq!(resource, "relations");
                assert_eq!(artist_id, 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        // The successful half was kept.
        let artist = catalog.artist(3).unwrap();
        assert!(artist.locations().is_some());
        assert!(artist.relations().is_none());
        assert_eq!(cache.memoized_count(), 0);

        fetcher.recover(&relation_url(3));
        cache.ensure_and_get(3).await.unwrap();

        assert_eq!(fetcher.calls(&locations_url(3)), 1);
        assert_eq!(fetcher.calls(&relation_url(3)), 2);
    }

    // ============================================================
    // DERIVED INFO TESTS
    // ============================================================

    #[tokio::test]
    async fn test_info_summary_lines_and_pins() {
        let fetcher = Arc::new(fixture_fetcher());
        let cache = enrichment(Arc::new(fixture_catalog()), fetcher);

        let info = cache.ensure_and_get(1).await.unwrap();

        assert_eq!(info.artist.name, "Queen");
        assert!(info.artist.relations().is_some());
        assert_eq!(
            info.concerts,
            vec![
                "London, UK: 28-01-2020",
                "Los Angeles, USA: 30-01-2019",
                "Osaka, Japan: 14-02-2020",
            ]
        );
        assert_eq!(info.coordinates.len(), info.concerts.len());
        assert_eq!(
            info.coordinates[0],
            LocationPin {
                name: "London, UK".to_string(),
                latitude: Some(51.5),
                longitude: Some(-0.12),
            }
        );
        assert_eq!(info.coordinates[1].name, "Los Angeles, USA");
        assert_eq!(info.coordinates[1].latitude, None);
    }

    #[tokio::test]
    async fn test_info_serializes_for_detail_consumers() {
        let fetcher = Arc::new(fixture_fetcher());
        let cache = enrichment(Arc::new(fixture_catalog()), fetcher);

        let info = cache.ensure_and_get(2).await.unwrap();
        let value = serde_json::to_value(info.as_ref()).unwrap();

        assert_eq!(value["artist"]["name"], "Pink Floyd");
        assert_eq!(value["concerts"][1], "Paris, France: 12-05-2019");
        assert_eq!(
            value["artist"]["relations"]["datesLocations"]["london-uk"][0],
            "10-05-2019"
        );
    }
}
