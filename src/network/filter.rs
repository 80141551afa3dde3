//! Static project deny-list applied before network construction

use crate::config::PipelineConfig;
use crate::model::ProjectRecord;
use std::collections::BTreeSet;

/// Drops rows belonging to excluded project slugs
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    excluded: BTreeSet<String>,
}

impl ProjectFilter {
    pub fn new<I, S>(slugs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded: slugs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            excluded: config.project_exclusion_list.clone(),
        }
    }

    pub fn is_excluded(&self, project_slug: &str) -> bool {
        self.excluded.contains(project_slug)
    }

    /// Rows whose project is not on the deny-list
    pub fn apply(&self, records: &[ProjectRecord]) -> Vec<ProjectRecord> {
        let kept: Vec<ProjectRecord> = records
            .iter()
            .filter(|r| !self.is_excluded(&r.project_slug))
            .cloned()
            .collect();
        tracing::info!(
            excluded_projects = self.excluded.len(),
            removed_rows = records.len() - kept.len(),
            "applied project exclusion list"
        );
        kept
    }
}
