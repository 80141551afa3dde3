//! Collaboration network
//!
//! Co-membership edges aggregated from project rosters, plus the compact
//! adjacency document handed to the downstream simulation.

pub mod adjacency;
pub mod builder;
pub mod filter;

pub use adjacency::{AdjacencyDocument, DetailedDocument, DetailedTarget};
pub use builder::{build_network, serialize, CollaborationNetwork, CollaborationNetworkBuilder};
pub use filter::ProjectFilter;
