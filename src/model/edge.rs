//! Pairwise relations between people

use serde::{Deserialize, Serialize};

/// Signed day overlap between two tenure windows (directed pair, A != B)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapEdge {
    pub person_a: String,
    pub person_b: String,
    pub overlap_days: f64,
}

/// How much project detail to keep on collaboration edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Collapse shared projects to a count
    #[default]
    Counts,
    /// Keep the list of shared projects
    Full,
}

/// A shared project carried on a `Full` edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SharedProject {
    pub project_slug: String,
    pub title: String,
}

/// Directed co-membership edge.
///
/// Both (A,B) and (B,A) exist for every co-membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationEdge {
    pub person_a: String,
    pub person_b: String,
    pub weight: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_projects: Option<Vec<SharedProject>>,
}

impl CollaborationEdge {
    /// Number of shared projects.
    ///
    /// In `Full` mode this is the length of the project list.
    pub fn weight(&self) -> usize {
        self.shared_projects
            .as_ref()
            .map_or(self.weight, Vec::len)
    }
}
