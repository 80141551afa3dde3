//! Co-membership aggregation
//!
//! Rosters are grouped by project slug in first-appearance order; every
//! ordered pair of distinct participants on a project yields one fact, and
//! facts are aggregated per (A, B) in first-appearance order. That order is
//! what the adjacency document preserves.

use super::adjacency::{AdjacencyDocument, DetailedDocument};
use crate::config::PipelineConfig;
use crate::model::{CollaborationEdge, DetailLevel, ProjectRecord, SharedProject};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// One project's de-duplicated roster
struct Roster<'a> {
    title: &'a str,
    members: Vec<&'a str>,
    seen: FxHashSet<&'a str>,
}

/// Aggregated collaboration edges, keyed by directed pair
#[derive(Debug, Clone)]
pub struct CollaborationNetwork {
    detail_level: DetailLevel,
    edges: FxIndexMap<(String, String), CollaborationEdge>,
}

impl CollaborationNetwork {
    pub fn detail_level(&self) -> DetailLevel {
        self.detail_level
    }

    /// Number of directed edges
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges in aggregation order
    pub fn edges(&self) -> impl Iterator<Item = &CollaborationEdge> {
        self.edges.values()
    }

    pub fn edge(&self, person_a: &str, person_b: &str) -> Option<&CollaborationEdge> {
        self.edges
            .get(&(person_a.to_string(), person_b.to_string()))
    }

    /// Shared-project count for a directed pair
    pub fn weight(&self, person_a: &str, person_b: &str) -> Option<usize> {
        self.edge(person_a, person_b).map(CollaborationEdge::weight)
    }

    pub fn into_edges(self) -> Vec<CollaborationEdge> {
        self.edges.into_values().collect()
    }

    /// Compact `source -> [[target, weight], ...]` document
    pub fn serialize(&self) -> AdjacencyDocument {
        AdjacencyDocument::from_edges(self.edges())
    }

    /// Per-edge project lists; empty lists in `Counts` mode
    pub fn serialize_detailed(&self) -> DetailedDocument {
        DetailedDocument::from_edges(self.edges())
    }
}

/// Builds the co-membership network from roster rows
#[derive(Debug, Clone, Default)]
pub struct CollaborationNetworkBuilder {
    detail_level: DetailLevel,
}

impl CollaborationNetworkBuilder {
    pub fn new(detail_level: DetailLevel) -> Self {
        Self { detail_level }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.detail_level)
    }

    pub fn build(&self, records: &[ProjectRecord]) -> CollaborationNetwork {
        let mut projects: FxIndexMap<&str, Roster<'_>> = FxIndexMap::default();
        for record in records {
            let roster = projects
                .entry(record.project_slug.as_str())
                .or_insert_with(|| Roster {
                    title: record.title.as_str(),
                    members: Vec::new(),
                    seen: FxHashSet::default(),
                });
            if roster.title.is_empty() {
                roster.title = record.title.as_str();
            }
            if roster.seen.insert(record.person_id.as_str()) {
                roster.members.push(record.person_id.as_str());
            }
        }

        let mut edges: FxIndexMap<(String, String), CollaborationEdge> = FxIndexMap::default();
        for (slug, roster) in &projects {
            for &a in &roster.members {
                for &b in &roster.members {
                    if a == b {
                        continue;
                    }
                    let edge = edges
                        .entry((a.to_string(), b.to_string()))
                        .or_insert_with(|| CollaborationEdge {
                            person_a: a.to_string(),
                            person_b: b.to_string(),
                            weight: 0,
                            shared_projects: match self.detail_level {
                                DetailLevel::Counts => None,
                                DetailLevel::Full => Some(Vec::new()),
                            },
                        });
                    match edge.shared_projects.as_mut() {
                        Some(shared) => {
                            shared.push(SharedProject {
                                project_slug: slug.to_string(),
                                title: roster.title.to_string(),
                            });
                            edge.weight = shared.len();
                        }
                        None => edge.weight += 1,
                    }
                }
            }
        }

        tracing::info!(
            projects = projects.len(),
            edges = edges.len(),
            detail = ?self.detail_level,
            "built collaboration network"
        );

        CollaborationNetwork {
            detail_level: self.detail_level,
            edges,
        }
    }
}

/// Directed co-membership edges for `records`
pub fn build_network(records: &[ProjectRecord], detail_level: DetailLevel) -> Vec<CollaborationEdge> {
    CollaborationNetworkBuilder::new(detail_level)
        .build(records)
        .into_edges()
}

/// Adjacency document for a list of edges, grouped by source in edge order
pub fn serialize(edges: &[CollaborationEdge]) -> AdjacencyDocument {
    AdjacencyDocument::from_edges(edges)
}
