use super::types::{IngestReport, TaskOutput, TaskReport};
use crate::catalog::format::format_location;
use crate::catalog::{Artist, Catalog, DateSet, Fetcher, LocationSet, SortedIndex, fetch_json};
use crate::dates::concert_date_key;
use crate::error::CatalogError;

use std::sync::Arc;

const LOCATIONS_TASK: &str = "locations";
const DATES_TASK: &str = "concert dates";

/// Fetches the artist list under `api_url` and both large sub-resources of
/// every artist, returning the assembled catalog.
///
/// # Errors
/// `CatalogError::FatalStartup` when the artist list cannot be fetched.
/// Sub-resource failures do not fail the call; they are recorded in the
/// returned `IngestReport`.
pub async fn ingest(
    fetcher: Arc<dyn Fetcher>,
    api_url: &str,
) -> Result<(Catalog, IngestReport), CatalogError> {
    let listing_url = format!("{}/artists", api_url.trim_end_matches('/'));

    let artists: Vec<Artist> = fetch_json(fetcher.as_ref(), &listing_url)
        .await
        .map_err(CatalogError::FatalStartup)?;

    tracing::info!("Fetched {} artists from {}", artists.len(), listing_url);

    let artists = Arc::new(artists);
    let locations_task = tokio::spawn(ingest_locations(artists.clone(), fetcher.clone()));
    let dates_task = tokio::spawn(ingest_concert_dates(artists.clone(), fetcher));

    let (locations, dates) = tokio::join!(locations_task, dates_task);
    let locations = locations.map_err(|e| CatalogError::TaskFailed(e.to_string()))?;
    let dates = dates.map_err(|e| CatalogError::TaskFailed(e.to_string()))?;

    let artists = Arc::unwrap_or_clone(artists);
    let report = IngestReport {
        artists: artists.len(),
        locations: locations.report,
        dates: dates.report,
    };

    tracing::info!(
        "Ingestion finished: {} locations, {} concert dates indexed",
        locations.index.len(),
        dates.index.len()
    );

    Ok((Catalog::new(artists, locations.index, dates.index), report))
}

async fn ingest_locations(artists: Arc<Vec<Artist>>, fetcher: Arc<dyn Fetcher>) -> TaskOutput {
    let mut index = SortedIndex::new();
    let mut processed = 0;

    for artist in artists.iter() {
        let set: LocationSet = match fetch_json(fetcher.as_ref(), &artist.locations_url).await {
            Ok(set) => set,
            Err(source) => {
                tracing::error!(
                    "Locations fetch failed for artist {}, stopping task: {}",
                    artist.id,
                    source
                );
                return TaskOutput {
                    report: TaskReport {
                        task: LOCATIONS_TASK,
                        processed,
                        failure: Some(CatalogError::PartialIngestion {
                            task: LOCATIONS_TASK,
                            artist_id: artist.id,
                            source,
                        }),
                    },
                    index,
                };
            }
        };

        for token in &set.locations {
            index.insert_unique(format_location(token));
        }
        artist.set_locations(set);
        processed += 1;

        tracing::debug!("Stored locations for artist {} ({})", artist.id, artist.name);
    }

    TaskOutput {
        report: TaskReport {
            task: LOCATIONS_TASK,
            processed,
            failure: None,
        },
        index,
    }
}

async fn ingest_concert_dates(
    artists: Arc<Vec<Artist>>,
    fetcher: Arc<dyn Fetcher>,
) -> TaskOutput {
    let mut index = SortedIndex::new();
    let mut processed = 0;

    for artist in artists.iter() {
        let set: DateSet = match fetch_json(fetcher.as_ref(), &artist.concert_dates_url).await {
            Ok(set) => set,
            Err(source) => {
                tracing::error!(
                    "Concert dates fetch failed for artist {}, stopping task: {}",
                    artist.id,
                    source
                );
                return TaskOutput {
                    report: TaskReport {
                        task: DATES_TASK,
                        processed,
                        failure: Some(CatalogError::PartialIngestion {
                            task: DATES_TASK,
                            artist_id: artist.id,
                            source,
                        }),
                    },
                    index,
                };
            }
        };

        for date in &set.dates {
            index.insert_unique(concert_date_key(date));
        }
        artist.set_concert_dates(set);
        processed += 1;

        tracing::debug!("Stored concert dates for artist {} ({})", artist.id, artist.name);
    }

    TaskOutput {
        report: TaskReport {
            task: DATES_TASK,
            processed,
            failure: None,
        },
        index,
    }
}
