//! Ingestion Result Types

use crate::catalog::SortedIndex;
use crate::error::CatalogError;

/// What one ingestion task did before it finished or aborted.
#[derive(Debug)]
pub struct TaskReport {
    pub task: &'static str,
    /// Artists whose sub-resource was stored.
    pub processed: usize,
    /// Set when the task stopped early.
    pub failure: Option<CatalogError>,
}

impl TaskReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Output of one ingestion task: its report plus the index it owned.
pub(crate) struct TaskOutput {
    pub report: TaskReport,
    pub index: SortedIndex<String>,
}

/// Summary of a whole ingestion run.
#[derive(Debug)]
pub struct IngestReport {
    pub artists: usize,
    pub locations: TaskReport,
    pub dates: TaskReport,
}

impl IngestReport {
    pub fn is_complete(&self) -> bool {
        self.locations.is_complete() && self.dates.is_complete()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CatalogError> {
        self.locations
            .failure
            .iter()
            .chain(self.dates.failure.iter())
    }
}
