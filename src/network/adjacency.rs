//! Serialized forms of the collaboration network
//!
//! `AdjacencyDocument` is the compact form consumed by the simulation:
//!
//! ```text
//! { "ann": [["bob", 2], ["cat", 1]], "bob": [["ann", 2]], ... }
//! ```
//!
//! Key order and array order follow edge aggregation order.

use crate::error::{PipelineError, PipelineResult};
use crate::model::{CollaborationEdge, SharedProject};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// `source -> [(target, weight)]`, one pair per directed edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyDocument(IndexMap<String, Vec<(String, usize)>>);

impl AdjacencyDocument {
    /// Group directed edges by source, keeping edge order
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a CollaborationEdge>,
    {
        let mut doc: IndexMap<String, Vec<(String, usize)>> = IndexMap::new();
        for edge in edges {
            doc.entry(edge.person_a.clone())
                .or_default()
                .push((edge.person_b.clone(), edge.weight()));
        }
        Self(doc)
    }

    /// Number of source people
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn targets(&self, source: &str) -> Option<&[(String, usize)]> {
        self.0.get(source).map(Vec::as_slice)
    }

    pub fn weight(&self, source: &str, target: &str) -> Option<usize> {
        self.targets(source)?
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, w)| *w)
    }

    /// All directed entries as `(source, target, weight)`
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, usize)> {
        self.0.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .map(move |(target, weight)| (source.as_str(), target.as_str(), *weight))
        })
    }

    pub fn to_json(&self) -> PipelineResult<String> {
        serde_json::to_string(self).map_err(|source| PipelineError::Json {
            path: "<adjacency>".to_string(),
            source,
        })
    }

    pub fn write_json<W: Write>(&self, writer: W) -> PipelineResult<()> {
        serde_json::to_writer(writer, self).map_err(|source| PipelineError::Json {
            path: "<adjacency>".to_string(),
            source,
        })
    }

    pub fn write_to_file(&self, path: impl AsRef<Path>) -> PipelineResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.write_json(std::io::BufWriter::new(file))?;
        tracing::info!(path = %path.display(), sources = self.len(), "wrote adjacency document");
        Ok(())
    }
}

/// One target in the detailed document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedTarget {
    pub target: String,
    pub weight: usize,
    pub projects: Vec<SharedProject>,
}

/// `source -> [{target, weight, projects}]`, for `full` detail runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DetailedDocument(IndexMap<String, Vec<DetailedTarget>>);

impl DetailedDocument {
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a CollaborationEdge>,
    {
        let mut doc: IndexMap<String, Vec<DetailedTarget>> = IndexMap::new();
        for edge in edges {
            doc.entry(edge.person_a.clone())
                .or_default()
                .push(DetailedTarget {
                    target: edge.person_b.clone(),
                    weight: edge.weight(),
                    projects: edge.shared_projects.clone().unwrap_or_default(),
                });
        }
        Self(doc)
    }

    pub fn targets(&self, source: &str) -> Option<&[DetailedTarget]> {
        self.0.get(source).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
