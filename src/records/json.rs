//! JSON-backed record store
//!
//! Reads a data directory holding `projects-active.json`,
//! `projects-inactive.json` and `people.json`. Project files are arrays of
//! project objects with a `people` roster; they are flattened to one row per
//! (project, member).

use super::RecordStore;
use crate::error::{PipelineError, PipelineResult};
use crate::model::{validate_rows, PersonStatus, ProjectRecord, RawProjectRow};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ACTIVE_PROJECTS_FILE: &str = "projects-active.json";
pub const INACTIVE_PROJECTS_FILE: &str = "projects-inactive.json";
pub const PEOPLE_FILE: &str = "people.json";

#[derive(Debug, Deserialize)]
struct ProjectEntry {
    slug: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    start_on: Option<String>,
    #[serde(default)]
    end_on: Option<String>,
    #[serde(default)]
    people: Vec<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct PersonEntry {
    #[serde(alias = "USERNAME")]
    username: Option<String>,
    #[serde(alias = "ML_STATUS", default)]
    ml_status: Option<bool>,
    #[serde(alias = "ML_GROUP", default)]
    ml_group: Option<String>,
}

/// Record store reading the JSON export of the project directory
#[derive(Debug, Clone)]
pub struct JsonRecordStore {
    dir: PathBuf,
    member_domain: Option<String>,
}

impl JsonRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            member_domain: None,
        }
    }

    /// Keep only roster entries of the form `<id>@<domain>`
    pub fn with_member_domain(mut self, domain: Option<String>) -> Self {
        self.member_domain = domain;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> PipelineResult<T> {
        let path = self.dir.join(file);
        let text = std::fs::read_to_string(&path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| PipelineError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    fn flatten(&self, entries: Vec<ProjectEntry>, is_active: bool, out: &mut Vec<RawProjectRow>) {
        for entry in entries {
            for person in entry.people.iter() {
                let person_id = match person.as_deref() {
                    Some(raw) => match member_id(raw, self.member_domain.as_deref()) {
                        Some(id) => Some(id),
                        None => {
                            debug!(member = raw, "skipping non-member roster entry");
                            continue;
                        }
                    },
                    None => None,
                };
                out.push(RawProjectRow {
                    project_slug: entry.slug.clone(),
                    person_id,
                    start_date: entry.start_on.clone(),
                    end_date: entry.end_on.clone(),
                    is_active,
                    title: entry.title.clone(),
                });
            }
        }
    }
}

/// Resolve a roster entry to a member id.
///
/// With a domain, only `<id>@<domain>` qualifies and the suffix is stripped.
/// Blank ids are passed through so validation can reject them.
pub fn member_id(raw: &str, domain: Option<&str>) -> Option<String> {
    let raw = raw.trim();
    match domain {
        Some(domain) => {
            let suffix = format!("@{}", domain);
            raw.strip_suffix(suffix.as_str())
                .map(|id| id.trim().to_string())
        }
        None => Some(raw.to_string()),
    }
}

impl RecordStore for JsonRecordStore {
    fn project_records(&self) -> PipelineResult<Vec<ProjectRecord>> {
        let inactive: Vec<ProjectEntry> = self.read(INACTIVE_PROJECTS_FILE)?;
        let active: Vec<ProjectEntry> = self.read(ACTIVE_PROJECTS_FILE)?;
        let projects = inactive.len() + active.len();

        let mut raw = Vec::new();
        self.flatten(inactive, false, &mut raw);
        self.flatten(active, true, &mut raw);

        let (records, dropped) = validate_rows(raw)?;
        info!(
            projects,
            rows = records.len(),
            dropped,
            dir = %self.dir.display(),
            "loaded project rosters"
        );
        Ok(records)
    }

    fn person_statuses(&self) -> PipelineResult<Vec<PersonStatus>> {
        let entries: Vec<PersonEntry> = self.read(PEOPLE_FILE)?;
        let total = entries.len();

        let statuses: Vec<PersonStatus> = entries
            .into_iter()
            .filter_map(|entry| {
                let person_id = entry
                    .username
                    .map(|u| u.trim().to_string())
                    .filter(|u| !u.is_empty())?;
                Some(PersonStatus {
                    person_id,
                    is_currently_active: entry.ml_status.unwrap_or(false),
                    group_label: entry.ml_group.filter(|g| !g.trim().is_empty()),
                })
            })
            .collect();

        info!(rows = statuses.len(), dropped = total - statuses.len(), "loaded person statuses");
        Ok(statuses)
    }
}
