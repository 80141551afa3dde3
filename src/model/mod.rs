//! Value records flowing through the pipeline
//!
//! Everything here is created once per batch run. The only derived fields
//! (`inferred_duration_days`, `inferred_end`) are filled in by the tenure
//! engine when the row is built.

pub mod edge;
pub mod record;
pub mod tenure;

pub use edge::{CollaborationEdge, DetailLevel, OverlapEdge, SharedProject};
pub use record::{parse_date, validate_rows, PersonStatus, ProjectRecord, RawProjectRow};
pub use tenure::{ImputationSummary, PersonTenure, TenureSource, TenureTable, TenureWindow};
