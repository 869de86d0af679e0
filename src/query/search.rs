use super::types::ResultEnvelope;
use crate::catalog::{Artist, Catalog};

/// Artists matching `query` anywhere in their searchable fields, in catalog
/// order. Matching is case-insensitive.
pub fn search(catalog: &Catalog, query: &str) -> Vec<ResultEnvelope> {
    let needle = query.to_lowercase();

    catalog
        .artists()
        .iter()
        .filter(|artist| matches_query(artist, &needle))
        .map(ResultEnvelope::artist)
        .collect()
}

/// `needle` must already be lowercase. Fields are checked in order and the
/// first hit wins.
pub fn matches_query(artist: &Artist, needle: &str) -> bool {
    artist.name.to_lowercase().contains(needle)
        || artist.members.join(" ").to_lowercase().contains(needle)
        || artist.first_album.to_lowercase().contains(needle)
        || artist.creation_date.to_string().contains(needle)
        || artist
            .location_tokens()
            .iter()
            .any(|token| token.contains(needle))
        || artist
            .concert_date_values()
            .iter()
            .any(|date| date.contains(needle))
}
