//! Inferred tenure windows

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Where a person's duration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TenureSource {
    /// Still affiliated: open until the reference date
    Active,
    /// End date observed on a roster
    Observed,
    /// End date predicted by the imputation model
    Imputed,
}

/// One person's affiliation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonTenure {
    pub person_id: String,
    pub first_start: NaiveDate,
    /// Last end date after the status override and future-date guard
    pub last_end: Option<NaiveDate>,
    pub project_count: usize,
    pub group_label: Option<String>,
    pub is_currently_active: bool,
    pub inferred_duration_days: f64,
    pub inferred_end: NaiveDate,
    pub source: TenureSource,
    /// Set when the duration was cut back to the reference date
    pub clamped: bool,
}

impl PersonTenure {
    /// Whole days from `first_start` to `reference`
    pub fn days_since_start(&self, reference: NaiveDate) -> i64 {
        (reference - self.first_start).num_days()
    }

    /// The window on the fractional day axis.
    ///
    /// Uses the unfloored `inferred_duration_days`, so overlaps can differ by
    /// up to a day from the displayed `[first_start, inferred_end]` dates.
    pub fn window(&self) -> TenureWindow {
        let start = f64::from(self.first_start.num_days_from_ce());
        TenureWindow {
            start,
            end: start + self.inferred_duration_days,
        }
    }
}

/// A tenure window as day numbers, for interval arithmetic
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TenureWindow {
    pub start: f64,
    pub end: f64,
}

impl TenureWindow {
    /// Signed overlap in days; non-positive means disjoint
    pub fn overlap(&self, other: &TenureWindow) -> f64 {
        self.end.min(other.end) - self.start.max(other.start)
    }
}

/// Fit diagnostics for the imputation model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImputationSummary {
    /// Departed/unknown-status people with an observed duration
    pub known_rows: usize,
    /// Known rows with a complete feature vector
    pub training_rows: usize,
    pub imputed_rows: usize,
    pub active_rows: usize,
    /// Rows whose duration was cut back to the reference date
    pub clamped_rows: usize,
    /// One-hot vocabulary, in column order
    pub categories: Vec<String>,
    /// Group indicators, then log(project count), then days since start
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

/// Output of tenure inference: one row per person, ordered by person id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenureTable {
    pub reference_date: NaiveDate,
    pub rows: Vec<PersonTenure>,
    pub summary: ImputationSummary,
}

impl TenureTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, person_id: &str) -> Option<&PersonTenure> {
        self.rows
            .binary_search_by(|row| row.person_id.as_str().cmp(person_id))
            .ok()
            .map(|i| &self.rows[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PersonTenure> {
        self.rows.iter()
    }
}
