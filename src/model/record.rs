//! Roster rows and person status rows

use crate::error::{PipelineError, PipelineResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accepted date layout for every roster date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One participant on one project.
///
/// Many records share a `project_slug`, one per participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub project_slug: String,
    pub person_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub title: String,
}

impl ProjectRecord {
    pub fn new(project_slug: impl Into<String>, person_id: impl Into<String>) -> Self {
        Self {
            project_slug: project_slug.into(),
            person_id: person_id.into(),
            start_date: None,
            end_date: None,
            is_active: false,
            title: String::new(),
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// A roster row as a source delivers it, before identity and date checks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProjectRow {
    pub project_slug: Option<String>,
    pub person_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    pub title: Option<String>,
}

impl RawProjectRow {
    /// Turn the raw row into a typed record.
    ///
    /// Missing (or blank) identifiers yield `MalformedRecord`; a present but
    /// unparseable date yields `DateParse`. Identity is checked first.
    pub fn validate(self, row: usize) -> PipelineResult<ProjectRecord> {
        let project_slug = non_blank(self.project_slug).ok_or(PipelineError::MalformedRecord {
            row,
            field: "project_slug",
        })?;
        let person_id = non_blank(self.person_id).ok_or(PipelineError::MalformedRecord {
            row,
            field: "person_id",
        })?;

        Ok(ProjectRecord {
            project_slug,
            person_id,
            start_date: parse_date("start_date", self.start_date.as_deref())?,
            end_date: parse_date("end_date", self.end_date.as_deref())?,
            is_active: self.is_active,
            title: self.title.unwrap_or_default(),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse an optional ISO date.
///
/// Absent or blank means "not yet known" and maps to `None`; anything else
/// must parse.
pub fn parse_date(field: &'static str, value: Option<&str>) -> PipelineResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, DATE_FORMAT)
            .map(Some)
            .map_err(|source| PipelineError::DateParse {
                field,
                value: text.to_string(),
                source,
            }),
    }
}

/// Validate a batch of raw rows.
///
/// Malformed rows are dropped and counted; date errors abort the batch.
/// Returns the valid records and the number of dropped rows.
pub fn validate_rows<I>(rows: I) -> PipelineResult<(Vec<ProjectRecord>, usize)>
where
    I: IntoIterator<Item = RawProjectRow>,
{
    let mut records = Vec::new();
    let mut dropped = 0;

    for (row, raw) in rows.into_iter().enumerate() {
        match raw.validate(row) {
            Ok(record) => records.push(record),
            Err(PipelineError::MalformedRecord { row, field }) => {
                tracing::debug!(row, field, "dropping roster row without identity");
                dropped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok((records, dropped))
}

/// Organization status and group for one person, from the status source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonStatus {
    pub person_id: String,
    pub is_currently_active: bool,
    pub group_label: Option<String>,
}

impl PersonStatus {
    pub fn new(person_id: impl Into<String>, is_currently_active: bool, group_label: Option<&str>) -> Self {
        Self {
            person_id: person_id.into(),
            is_currently_active,
            group_label: group_label.map(str::to_string),
        }
    }
}
