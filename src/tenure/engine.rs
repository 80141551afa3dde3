//! Tenure inference engine
//!
//! Pipeline per person:
//! 1. first start / last observed end / distinct project count from rosters
//! 2. status override (still affiliated => open until the reference date)
//! 3. future-date guard (ends past the reference date are treated as unset;
//!    people who only start after it are left out)
//! 4. impute missing durations for departed or unknown-status people
//! 5. clamp to `[0, days_since_start]` and derive the end date

use super::features::{FeatureRow, FeatureTransform};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, PipelineResult};
use crate::model::{
    ImputationSummary, PersonStatus, PersonTenure, ProjectRecord, TenureSource, TenureTable,
};
use crate::records::{GroupClassifier, StatusTable};
use chrono::{Duration, NaiveDate};
use collabnet_stats::LinearModel;
use ndarray::Array1;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};

/// Per-person roster aggregate
#[derive(Default)]
struct RosterSpan<'a> {
    first_start: Option<NaiveDate>,
    last_end: Option<NaiveDate>,
    projects: BTreeSet<&'a str>,
}

/// A person after the status/guard rules, before imputation
struct Observation {
    person_id: String,
    first_start: NaiveDate,
    last_end: Option<NaiveDate>,
    project_count: usize,
    group_label: Option<String>,
    is_currently_active: bool,
    duration_days: Option<i64>,
    days_since_start: i64,
}

impl Observation {
    fn features(&self) -> FeatureRow<'_> {
        FeatureRow {
            group: self.group_label.as_deref(),
            project_count: self.project_count,
            days_since_start: self.days_since_start,
        }
    }
}

/// Infers a tenure window for every person on the rosters
#[derive(Debug, Clone)]
pub struct TenureInferenceEngine {
    reference_date: NaiveDate,
}

impl TenureInferenceEngine {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.reference_date)
    }

    /// Run inference over all roster rows.
    ///
    /// Fails with `InsufficientData` when no departed/unknown-status person
    /// with a group label has an observed duration; nothing is returned in
    /// that case.
    pub fn infer(
        &self,
        records: &[ProjectRecord],
        classifier: &dyn GroupClassifier,
    ) -> PipelineResult<TenureTable> {
        let observations = self.observe(records, classifier);

        let mut active = Vec::new();
        let mut known = Vec::new();
        let mut unknown = Vec::new();
        for obs in observations {
            if obs.is_currently_active {
                active.push(obs);
            } else if obs.duration_days.is_some() {
                known.push(obs);
            } else {
                unknown.push(obs);
            }
        }

        let training: Vec<&Observation> = known.iter().filter(|o| o.group_label.is_some()).collect();
        info!(
            active = active.len(),
            known = known.len(),
            training = training.len(),
            unknown = unknown.len(),
            "partitioned people for imputation"
        );
        if training.is_empty() {
            return Err(PipelineError::InsufficientData {
                candidates: known.len() + unknown.len(),
            });
        }

        // Fit strictly before predict: the model only exists once fitted
        let training_rows: Vec<FeatureRow<'_>> = training.iter().map(|o| o.features()).collect();
        let predict_rows: Vec<FeatureRow<'_>> = unknown.iter().map(|o| o.features()).collect();
        let transform = FeatureTransform::fit(&training_rows, &predict_rows);

        let x = transform.matrix(&training_rows);
        let y: Array1<f64> = training
            .iter()
            .map(|o| o.duration_days.unwrap_or_default() as f64)
            .collect();
        let model = LinearModel::fit(&x, &y)?;
        let predicted = model.predict(&transform.matrix(&predict_rows))?;

        let mut summary = ImputationSummary {
            known_rows: known.len(),
            training_rows: training.len(),
            imputed_rows: unknown.len(),
            active_rows: active.len(),
            clamped_rows: 0,
            categories: transform.categories().to_vec(),
            coefficients: model.coefficients().to_vec(),
            intercept: model.intercept(),
        };

        let mut rows = Vec::with_capacity(active.len() + known.len() + unknown.len());
        for obs in active {
            let days = obs.duration_days.unwrap_or_default() as f64;
            rows.push(self.finish(obs, days, TenureSource::Active, &mut summary));
        }
        for obs in known {
            let days = obs.duration_days.unwrap_or_default() as f64;
            rows.push(self.finish(obs, days, TenureSource::Observed, &mut summary));
        }
        for (obs, days) in unknown.into_iter().zip(predicted.iter().copied()) {
            rows.push(self.finish(obs, days, TenureSource::Imputed, &mut summary));
        }
        rows.sort_by(|a, b| a.person_id.cmp(&b.person_id));

        info!(
            people = rows.len(),
            clamped = summary.clamped_rows,
            intercept = summary.intercept,
            "tenure inference complete"
        );

        Ok(TenureTable {
            reference_date: self.reference_date,
            rows,
            summary,
        })
    }

    /// Aggregate rosters per person and apply the status override and the
    /// future-date guard. People without any start date, or whose first
    /// start is after the reference date, are left out.
    fn observe(
        &self,
        records: &[ProjectRecord],
        classifier: &dyn GroupClassifier,
    ) -> Vec<Observation> {
        let mut spans: BTreeMap<&str, RosterSpan<'_>> = BTreeMap::new();
        for record in records {
            let span = spans.entry(record.person_id.as_str()).or_default();
            span.projects.insert(record.project_slug.as_str());
            if let Some(start) = record.start_date {
                span.first_start = Some(span.first_start.map_or(start, |s| s.min(start)));
            }
            if let Some(end) = record.end_date {
                span.last_end = Some(span.last_end.map_or(end, |e| e.max(end)));
            }
        }

        let mut observations = Vec::with_capacity(spans.len());
        for (person_id, span) in spans {
            let Some(first_start) = span.first_start else {
                warn!(person = person_id, "no start date on any project; person skipped");
                continue;
            };
            if first_start > self.reference_date {
                warn!(
                    person = person_id,
                    %first_start,
                    reference = %self.reference_date,
                    "first start is after the reference date; person skipped"
                );
                continue;
            }

            let is_currently_active = classifier.status_of(person_id) == Some(true);
            let mut last_end = if is_currently_active {
                Some(self.reference_date)
            } else {
                span.last_end
            };
            if last_end.is_some_and(|end| end > self.reference_date) {
                last_end = None;
            }

            observations.push(Observation {
                person_id: person_id.to_string(),
                first_start,
                last_end,
                project_count: span.projects.len(),
                group_label: classifier.group_of(person_id).map(str::to_string),
                is_currently_active,
                duration_days: last_end.map(|end| (end - first_start).num_days()),
                days_since_start: (self.reference_date - first_start).num_days(),
            });
        }
        observations
    }

    /// Clamp a duration into `[0, days_since_start]` and build the row.
    ///
    /// `days_since_start` is never negative here. The zero floor catches
    /// rosters whose end precedes their start and negative predictions.
    /// The end date is `first_start + floor(duration)` days.
    fn finish(
        &self,
        obs: Observation,
        days: f64,
        source: TenureSource,
        summary: &mut ImputationSummary,
    ) -> PersonTenure {
        let ceiling = obs.days_since_start as f64;
        let mut clamped = false;
        let mut days = days;
        if days > ceiling {
            if source == TenureSource::Observed {
                warn!(
                    person = %obs.person_id,
                    observed = days,
                    ceiling,
                    "observed duration exceeds time since start"
                );
            }
            days = ceiling;
            clamped = true;
            summary.clamped_rows += 1;
        }
        if days < 0.0 {
            days = 0.0;
        }

        PersonTenure {
            inferred_end: obs.first_start + Duration::days(days.floor() as i64),
            inferred_duration_days: days,
            person_id: obs.person_id,
            first_start: obs.first_start,
            last_end: obs.last_end,
            project_count: obs.project_count,
            group_label: obs.group_label,
            is_currently_active: obs.is_currently_active,
            source,
            clamped,
        }
    }
}

/// Infer tenure for `records` using `people` as the group/status source
pub fn infer_tenure(
    records: &[ProjectRecord],
    people: &[PersonStatus],
    reference_date: NaiveDate,
) -> PipelineResult<TenureTable> {
    let classifier = StatusTable::from_statuses(people);
    TenureInferenceEngine::new(reference_date).infer(records, &classifier)
}
