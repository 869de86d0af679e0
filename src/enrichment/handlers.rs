use super::cache::EnrichmentCache;
use super::types::ArtistInfo;
use crate::error::CatalogError;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_detail(
    Path(raw_id): Path<String>,
    Extension(enrichment): Extension<Arc<EnrichmentCache>>,
) -> Result<Json<ArtistInfo>, (StatusCode, String)> {
    let artist_id: u32 = raw_id.parse().map_err(|_| {
        let err = CatalogError::Validation {
            field: "id",
            value: raw_id.clone(),
        };
        (err.status_code(), err.to_string())
    })?;

    match enrichment.ensure_and_get(artist_id).await {
        Ok(info) => Ok(Json(info.as_ref().clone())),
        Err(err) => {
            tracing::error!("Detail request for artist {} failed: {}", artist_id, err);
            Err((err.status_code(), err.to_string()))
        }
    }
}
