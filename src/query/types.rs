//! Query Data Types
//!
//! `FilterQuery` is the raw query string as the HTTP layer receives it;
//! `FilterParams` is the validated form the engine evaluates.

use crate::catalog::{Artist, Bounds, Catalog};
use crate::dates::CalendarDate;
use crate::error::CatalogError;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const ARTIST_RESULT_TYPE: &str = "artist/band";

/// Uniform wrapper around every query hit.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Artist,
}

impl ResultEnvelope {
    pub fn artist(artist: &Artist) -> Self {
        Self {
            kind: ARTIST_RESULT_TYPE,
            data: artist.clone(),
        }
    }
}

/// Raw filter parameters. Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    /// Comma-separated member counts, e.g. `4,5`.
    #[serde(rename = "membs")]
    pub member_counts: Option<String>,
    #[serde(rename = "minCrtD")]
    pub min_creation_date: Option<String>,
    #[serde(rename = "maxCrtD")]
    pub max_creation_date: Option<String>,
    /// Year-first, e.g. `1967-08-05`.
    #[serde(rename = "minFAD")]
    pub min_first_album: Option<String>,
    #[serde(rename = "maxFAD")]
    pub max_first_album: Option<String>,
    /// A formatted location, e.g. `London, UK`.
    pub location: Option<String>,
    /// Year-first, `2019/08/23` or `2019-08-23`.
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    /// Empty means any count.
    pub member_counts: BTreeSet<usize>,
    pub min_creation_date: Option<u32>,
    pub max_creation_date: Option<u32>,
    pub min_first_album: Option<CalendarDate>,
    pub max_first_album: Option<CalendarDate>,
    pub location: Option<String>,
    /// Date index key (`YYYY/MM/DD`).
    pub date: Option<String>,
}

impl FilterParams {
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn invalid(field: &'static str, value: &str) -> CatalogError {
    CatalogError::Validation {
        field,
        value: value.to_string(),
    }
}

fn parse_year(field: &'static str, value: Option<&str>) -> Result<Option<u32>, CatalogError> {
    value
        .map(|v| v.parse::<u32>().map_err(|_| invalid(field, v)))
        .transpose()
}

fn parse_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<CalendarDate>, CatalogError> {
    value
        .map(|v| CalendarDate::parse_year_first(v).ok_or_else(|| invalid(field, v)))
        .transpose()
}

impl TryFrom<FilterQuery> for FilterParams {
    type Error = CatalogError;

    fn try_from(query: FilterQuery) -> Result<Self, Self::Error> {
        let mut member_counts = BTreeSet::new();
        if let Some(raw) = present(&query.member_counts) {
            for piece in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let count = piece
                    .parse::<usize>()
                    .map_err(|_| invalid("membs", piece))?;
                member_counts.insert(count);
            }
        }

        Ok(Self {
            member_counts,
            min_creation_date: parse_year("minCrtD", present(&query.min_creation_date))?,
            max_creation_date: parse_year("maxCrtD", present(&query.max_creation_date))?,
            min_first_album: parse_date("minFAD", present(&query.min_first_album))?,
            max_first_album: parse_date("maxFAD", present(&query.max_first_album))?,
            location: present(&query.location).map(str::to_string),
            date: parse_date("date", present(&query.date))?.map(|d| d.index_key()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Everything a landing page needs in one response.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogOverview {
    pub artists: Vec<Artist>,
    pub bounds: Bounds,
    pub locations: Vec<String>,
    pub dates: Vec<String>,
}

impl CatalogOverview {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        Self {
            artists: catalog.artists().to_vec(),
            bounds: catalog.bounds(),
            locations: catalog.location_index().to_vec(),
            dates: catalog.date_index().to_vec(),
        }
    }
}
