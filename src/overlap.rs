//! Pairwise tenure overlap
//!
//! Every tenure window is loaded once into a map keyed by person id; the
//! ordered pair set is then evaluated against that map. Pairs are
//! independent, so evaluation can run on the rayon pool. Output order is
//! always (person_a, person_b) ascending.

use crate::error::{PipelineError, PipelineResult};
use crate::model::{OverlapEdge, TenureTable, TenureWindow};
use rayon::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Computes signed day overlaps between tenure windows
pub struct OverlapCalculator<'a> {
    windows: HashMap<&'a str, TenureWindow>,
    parallel: bool,
}

impl<'a> OverlapCalculator<'a> {
    pub fn new(table: &'a TenureTable) -> Self {
        let windows = table
            .iter()
            .map(|row| (row.person_id.as_str(), row.window()))
            .collect();
        Self {
            windows,
            parallel: true,
        }
    }

    /// Toggle rayon evaluation; the result is identical either way
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Overlaps for every ordered pair of people in the table
    pub fn compute_all(&self) -> Vec<OverlapEdge> {
        let mut people: Vec<(&str, TenureWindow)> =
            self.windows.iter().map(|(id, w)| (*id, *w)).collect();
        people.sort_by(|a, b| a.0.cmp(b.0));
        self.pairs(&people)
    }

    /// Overlaps for every ordered pair within `subset`.
    ///
    /// Fails with `UnknownPerson` if any requested id has no tenure row.
    /// Duplicate ids are collapsed.
    pub fn compute_subset<I, S>(&self, subset: I) -> PipelineResult<Vec<OverlapEdge>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<String> = subset
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut people = Vec::with_capacity(requested.len());
        for id in &requested {
            let (key, window) = self
                .windows
                .get_key_value(id.as_str())
                .ok_or_else(|| PipelineError::UnknownPerson(id.clone()))?;
            people.push((*key, *window));
        }
        Ok(self.pairs(&people))
    }

    /// `people` must be sorted by id
    fn pairs(&self, people: &[(&str, TenureWindow)]) -> Vec<OverlapEdge> {
        let n = people.len();
        let edge = |i: usize, j: usize| OverlapEdge {
            person_a: people[i].0.to_string(),
            person_b: people[j].0.to_string(),
            overlap_days: people[i].1.overlap(&people[j].1),
        };

        let edges: Vec<OverlapEdge> = if self.parallel {
            (0..n)
                .into_par_iter()
                .flat_map_iter(|i| (0..n).filter(move |&j| j != i).map(move |j| edge(i, j)))
                .collect()
        } else {
            (0..n)
                .flat_map(|i| (0..n).filter(move |&j| j != i).map(move |j| edge(i, j)))
                .collect()
        };

        tracing::debug!(people = n, pairs = edges.len(), "computed tenure overlaps");
        edges
    }
}

/// Overlap over the whole table, or over `subset` when given
pub fn compute_overlaps(
    table: &TenureTable,
    subset: Option<&[String]>,
) -> PipelineResult<Vec<OverlapEdge>> {
    let calculator = OverlapCalculator::new(table);
    match subset {
        Some(ids) => calculator.compute_subset(ids),
        None => Ok(calculator.compute_all()),
    }
}
