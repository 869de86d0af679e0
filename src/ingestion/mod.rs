//! Ingestion Module
//!
//! Builds the in-memory catalog at startup.
//!
//! ## Workflow
//! 1. **Listing**: fetches the artist list from the catalog root. Failure is fatal.
//! 2. **Fan-out**: two concurrent tasks walk every artist in catalog order, one
//!    fetching location lists, the other concert-date lists.
//! 3. **Indexing**: each task formats what it fetched and feeds its own
//!    `SortedIndex`; the index is handed back when the task finishes.
//! 4. **Barrier**: the catalog is assembled once both tasks have finished.
//!
//! A sub-resource failure stops only the task that hit it. Artists visited
//! before the failure keep their data; later ones stay empty until enrichment
//! fills them in.

pub mod pipeline;
pub mod types;

pub use pipeline::ingest;
pub use types::{IngestReport, TaskReport};
