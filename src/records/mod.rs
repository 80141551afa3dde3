//! Typed access to project rosters and person status rows
//!
//! The pipeline only depends on the `RecordStore` and `GroupClassifier`
//! traits; file formats live behind them.

pub mod classifier;
pub mod json;

pub use classifier::{GroupClassifier, StatusTable};
pub use json::JsonRecordStore;

use crate::error::PipelineResult;
use crate::model::{PersonStatus, ProjectRecord};

/// Source of roster rows and person status rows
pub trait RecordStore {
    /// All valid roster rows (active and inactive projects)
    fn project_records(&self) -> PipelineResult<Vec<ProjectRecord>>;

    /// Organization status and group per person
    fn person_statuses(&self) -> PipelineResult<Vec<PersonStatus>>;
}

/// Store over rows already held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    records: Vec<ProjectRecord>,
    statuses: Vec<PersonStatus>,
}

impl InMemoryStore {
    pub fn new(records: Vec<ProjectRecord>, statuses: Vec<PersonStatus>) -> Self {
        Self { records, statuses }
    }

    pub fn push_record(&mut self, record: ProjectRecord) {
        self.records.push(record);
    }

    pub fn push_status(&mut self, status: PersonStatus) {
        self.statuses.push(status);
    }
}

impl RecordStore for InMemoryStore {
    fn project_records(&self) -> PipelineResult<Vec<ProjectRecord>> {
        Ok(self.records.clone())
    }

    fn person_statuses(&self) -> PipelineResult<Vec<PersonStatus>> {
        Ok(self.statuses.clone())
    }
}
