//! Error Taxonomy
//!
//! Two layers of errors flow through the crate:
//! - **`FetchError`**: what the fetch capability reports for a single URL.
//! - **`CatalogError`**: what the subsystems report to their callers. Each variant
//!   maps to one failure class of the service (startup, ingestion, enrichment,
//!   geocoding, validation) and carries enough context to be logged as-is.

use axum::http::StatusCode;

/// Failure of a single fetch against the remote catalog or the geocoder.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("status code error for {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl FetchError {
    /// Network and timeout failures are transient; a bad status or body is not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Network { .. } | FetchError::Timeout { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The base artist list could not be fetched. Nothing can be served.
    #[error("failed to fetch artist list: {0}")]
    FatalStartup(#[source] FetchError),

    /// A sub-resource fetch failed during ingestion and the task stopped.
    #[error("{task} ingestion aborted at artist {artist_id}: {source}")]
    PartialIngestion {
        task: &'static str,
        artist_id: u32,
        #[source]
        source: FetchError,
    },

    /// A detail sub-resource could not be fetched for one artist.
    #[error("failed to fetch {resource} for artist {artist_id}: {source}")]
    Enrichment {
        artist_id: u32,
        resource: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("artist {0} does not exist")]
    NotFound(u32),

    /// A location could not be resolved while building the coordinate cache.
    #[error("could not geocode '{location}': {reason}")]
    GeocodeFatal { location: String, reason: String },

    #[error("invalid value '{value}' for {field}")]
    Validation { field: &'static str, value: String },

    #[error("coordinate cache io error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("coordinate cache format error: {0}")]
    CacheFormat(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    TaskFailed(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Validation { .. } => StatusCode::BAD_REQUEST,
            CatalogError::Enrichment { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
