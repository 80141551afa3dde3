//! Collabnet
//!
//! Reconstructs, from sparse project-membership records, the window each
//! person was affiliated with an organization, and derives a weighted
//! co-membership graph for a downstream agent-based simulation.
//!
//! # Components
//!
//! - [`records`]: typed roster and status rows behind a `RecordStore`
//! - [`tenure`]: start/end per person, with regression imputation of missing ends
//! - [`overlap`]: signed pairwise day-overlap between tenure windows
//! - [`network`]: co-membership edges and the compact adjacency document
//! - [`pipeline`]: the batch run tying them together
//!
//! ## Example Usage
//!
//! ```rust
//! use collabnet::model::{DetailLevel, ProjectRecord};
//! use collabnet::network::CollaborationNetworkBuilder;
//!
//! let records = vec![
//!     ProjectRecord::new("alpha", "ann"),
//!     ProjectRecord::new("alpha", "bob"),
//! ];
//! let network = CollaborationNetworkBuilder::new(DetailLevel::Counts).build(&records);
//! let doc = network.serialize();
//! assert_eq!(doc.weight("ann", "bob"), Some(1));
//! assert_eq!(doc.to_json().unwrap(), r#"{"ann":[["bob",1]],"bob":[["ann",1]]}"#);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod overlap;
pub mod pipeline;
pub mod records;
pub mod tenure;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use model::{
    CollaborationEdge, DetailLevel, OverlapEdge, PersonStatus, PersonTenure, ProjectRecord,
    TenureSource, TenureTable,
};
pub use network::{AdjacencyDocument, CollaborationNetwork, CollaborationNetworkBuilder, ProjectFilter};
pub use overlap::{compute_overlaps, OverlapCalculator};
pub use pipeline::{Pipeline, PipelineOutput};
pub use records::{GroupClassifier, InMemoryStore, JsonRecordStore, RecordStore, StatusTable};
pub use tenure::{infer_tenure, TenureInferenceEngine};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
