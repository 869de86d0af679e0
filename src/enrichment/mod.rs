//! Lazy Enrichment Module
//!
//! Detail views need two sub-resources that ingestion does not fetch up front
//! (the full location document and the date/location relation map). The first
//! request for an artist fetches whatever is still missing, concurrently, and
//! derives an `ArtistInfo` that is memoized for the rest of the process.
//!
//! ## Guarantees
//! - **Single-flight**: concurrent first requests for the same artist share one
//!   enrichment; a per-artist async mutex serializes them.
//! - **Per-resource retry**: a failure leaves the other sub-resource stored, and
//!   the next request only fetches the side that is still missing.
//! - **Memoization**: once built with a ready coordinate cache, an `ArtistInfo`
//!   is served unchanged.

pub mod cache;
pub mod handlers;
pub mod types;

pub use cache::EnrichmentCache;
pub use types::{ArtistInfo, LocationPin};

#[cfg(test)]
mod tests;
