//! Catalog Module
//!
//! The in-memory model of the remote catalog and the primitives every other
//! subsystem builds on.
//!
//! ## Submodules
//! - **`types`**: `Artist` and its three sub-resources, plus the aggregated `Catalog`.
//! - **`index`**: `SortedIndex`, the small ordered duplicate-free collection behind
//!   the global location and date facets.
//! - **`format`**: turning raw location tokens (`new_york-usa`) into display names.
//! - **`fetch`**: the abstract fetch capability and its HTTP implementation.

pub mod fetch;
pub mod format;
pub mod index;
pub mod types;

pub use fetch::{Fetcher, HttpFetcher, fetch_json};
pub use index::SortedIndex;
pub use types::{Artist, Bounds, Catalog, DateSet, LocationSet, RelationMap};
