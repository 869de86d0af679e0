use super::types::{FilterParams, ResultEnvelope};
use crate::catalog::format::format_location;
use crate::catalog::{Artist, Catalog};
use crate::dates::concert_date_key;

/// Artists satisfying every predicate in `params`, in catalog order.
pub fn filter(catalog: &Catalog, params: &FilterParams) -> Vec<ResultEnvelope> {
    catalog
        .artists()
        .iter()
        .filter(|artist| matches_filters(artist, params))
        .map(ResultEnvelope::artist)
        .collect()
}

pub fn matches_filters(artist: &Artist, params: &FilterParams) -> bool {
    if !params.member_counts.is_empty() && !params.member_counts.contains(&artist.member_count())
    {
        return false;
    }

    if let Some(min) = params.min_creation_date
        && artist.creation_date < min
    {
        return false;
    }

    if let Some(max) = params.max_creation_date
        && artist.creation_date > max
    {
        return false;
    }

    if params.min_first_album.is_some() || params.max_first_album.is_some() {
        // An undated artist cannot satisfy a date bound.
        let Some(first_album) = artist.first_album_date() else {
            return false;
        };

        if let Some(min) = params.min_first_album
            && first_album < min
        {
            return false;
        }

        if let Some(max) = params.max_first_album
            && first_album > max
        {
            return false;
        }
    }

    if let Some(location) = &params.location
        && !artist
            .location_tokens()
            .iter()
            .any(|token| format_location(token) == *location)
    {
        return false;
    }

    if let Some(date) = &params.date
        && !artist
            .concert_date_values()
            .iter()
            .any(|raw| concert_date_key(raw) == *date)
    {
        return false;
    }

    true
}
