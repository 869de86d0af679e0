use super::filter::filter;
use super::search::search;
use super::types::{CatalogOverview, FilterParams, FilterQuery, ResultEnvelope, SearchParams};
use crate::catalog::Catalog;
use crate::error::CatalogError;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

pub async fn handle_catalog(
    Extension(catalog): Extension<Arc<Catalog>>,
) -> Json<CatalogOverview> {
    Json(CatalogOverview::from_catalog(&catalog))
}

pub async fn handle_filter(
    Query(query): Query<FilterQuery>,
    Extension(catalog): Extension<Arc<Catalog>>,
) -> Result<Json<Vec<ResultEnvelope>>, (StatusCode, String)> {
    let params = FilterParams::try_from(query).map_err(|err| {
        tracing::debug!("Rejected filter query: {}", err);
        (err.status_code(), err.to_string())
    })?;

    let results = filter(&catalog, &params);
    tracing::debug!("Filter matched {} artists", results.len());

    Ok(Json(results))
}

pub async fn handle_search(
    Query(params): Query<SearchParams>,
    Extension(catalog): Extension<Arc<Catalog>>,
) -> Result<Json<Vec<ResultEnvelope>>, (StatusCode, String)> {
    let query = params.q.as_deref().map(str::trim).unwrap_or_default();
    if query.is_empty() {
        let err = CatalogError::Validation {
            field: "q",
            value: String::new(),
        };
        return Err((err.status_code(), err.to_string()));
    }

    let results = search(&catalog, query);
    tracing::debug!("Search '{}' matched {} artists", query, results.len());

    Ok(Json(results))
}
