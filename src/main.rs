use axum::routing::get;
use axum::{Extension, Router};
use concert_catalog::catalog::{Catalog, Fetcher, HttpFetcher};
use concert_catalog::config::Config;
use concert_catalog::enrichment::EnrichmentCache;
use concert_catalog::enrichment::handlers::handle_detail;
use concert_catalog::error::CatalogError;
use concert_catalog::geocode::{GeocodeCache, NominatimGeocoder};
use concert_catalog::ingestion::ingest;
use concert_catalog::query::handlers::{handle_catalog, handle_filter, handle_search};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let config = match Config::load(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            eprintln!(
                "Usage: {} [--api <url>] [--geocoder <url>] [--coords <file>] [--bind <addr:port>]",
                args.first().map(String::as_str).unwrap_or("concert-catalog")
            );
            eprintln!("       [--timeout-ms <n>] [--attempts <n>] [--geocode-interval-ms <n>]");
            std::process::exit(1);
        }
    };

    tracing::info!("Using catalog API {}", config.api_url);

    let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(
        config.fetch_timeout,
        config.fetch_attempts,
    ));

    // 1. Ingestion:
    let (catalog, report) = match ingest(fetcher.clone(), &config.api_url).await {
        Ok(result) => result,
        Err(err @ CatalogError::FatalStartup(_)) => {
            tracing::error!("Cannot start without the artist listing: {}", err);
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    for failure in report.failures() {
        tracing::warn!("Serving partial indices: {}", failure);
    }
    tracing::info!(
        "Catalog ready: {} artists, {} locations, {} dates",
        report.artists,
        catalog.location_index().len(),
        catalog.date_index().len()
    );

    let catalog = Arc::new(catalog);

    // 2. Coordinate cache, built in the background:
    let geocodes = Arc::new(GeocodeCache::new(config.coordinates_file.clone()));
    spawn_geocoding(&config, catalog.clone(), fetcher.clone(), geocodes.clone());

    // 3. Enrichment:
    let enrichment = Arc::new(EnrichmentCache::new(catalog.clone(), fetcher, geocodes));

    // 4. HTTP Router:
    let app = Router::new()
        .route("/catalog", get(handle_catalog))
        .route("/filter", get(handle_filter))
        .route("/search", get(handle_search))
        .route("/detail/:id", get(handle_detail))
        .layer(Extension(catalog))
        .layer(Extension(enrichment));

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// A location that cannot be geocoded leaves the cache unusable, so the
/// process exits.
fn spawn_geocoding(
    config: &Config,
    catalog: Arc<Catalog>,
    fetcher: Arc<dyn Fetcher>,
    geocodes: Arc<GeocodeCache>,
) {
    let geocoder = NominatimGeocoder::new(fetcher, &config.geocoder_url, config.geocode_interval);

    tokio::spawn(async move {
        if let Err(err) = geocodes
            .load_or_build(catalog.location_index(), &geocoder)
            .await
        {
            tracing::error!(
                "Coordinate cache {} could not be built: {}",
                geocodes.path().display(),
                err
            );
            std::process::exit(1);
        }
    });
}
