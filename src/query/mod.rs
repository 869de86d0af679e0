//! Query Engine Module
//!
//! Read-only evaluation of user queries against the ingested catalog.
//!
//! ## Operations
//! - **Filter** (`filter`): structured predicates (member counts, creation year
//!   range, first-album date range, concert location, concert date). Every
//!   supplied predicate must hold; absent ones are ignored.
//! - **Search** (`search`): free-text substring match over names, members,
//!   dates and raw location tokens, in catalog order.
//!
//! Both return artists wrapped in a uniform `ResultEnvelope`.

pub mod filter;
pub mod handlers;
pub mod search;
pub mod types;

pub use filter::{filter, matches_filters};
pub use search::{matches_query, search};
pub use types::{CatalogOverview, FilterParams, FilterQuery, ResultEnvelope, SearchParams};
