//! Concert Catalog Library
//!
//! Aggregates artists from a remote catalog API into an in-memory model and
//! answers filter, search and detail queries over it. The binary (`main.rs`)
//! wires these modules behind a small JSON HTTP surface.
//!
//! ## Architecture Modules
//! - **`dates`**: the lexical date encoder that turns `D-M-Y` strings into
//!   sortable keys, and `CalendarDate` for chronological comparison.
//! - **`catalog`**: the data model (artists and their lazily attached
//!   sub-resources), the dedup-sorted index, location formatting and the
//!   abstract fetch capability with its HTTP implementation.
//! - **`ingestion`**: startup pipeline. Fetches the artist listing, then runs
//!   the location and concert-date tasks concurrently, each building its own
//!   index.
//! - **`enrichment`**: single-flight, memoized per-artist enrichment behind the
//!   detail view.
//! - **`geocode`**: coordinates for every indexed location, persisted to a
//!   JSON side-cache file and filled incrementally from a geocoder.
//! - **`query`**: structured filters and free-text search.
//! - **`config`** / **`error`**: runtime settings and the error taxonomy.

pub mod catalog;
pub mod config;
pub mod dates;
pub mod enrichment;
pub mod error;
pub mod geocode;
pub mod ingestion;
pub mod query;

#[cfg(test)]
mod test_support;
