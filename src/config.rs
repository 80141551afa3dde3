//! Pipeline configuration
//!
//! Loaded from YAML or built in code. The reference date travels inside the
//! config into every component that reasons about "now".

use crate::error::{PipelineError, PipelineResult};
use crate::model::DetailLevel;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Batch pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Cutoff treated as "now" for the dataset
    pub reference_date: NaiveDate,
    /// Whether network edges keep their shared-project lists
    pub detail_level: DetailLevel,
    /// Project slugs dropped before network construction
    pub project_exclusion_list: BTreeSet<String>,
    /// Keep only roster members `<id>@<domain>`, stripping the domain
    pub member_domain: Option<String>,
    /// Evaluate overlap pairs on the rayon pool
    pub parallel_overlap: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap_or_default(),
            detail_level: DetailLevel::Counts,
            project_exclusion_list: [
                "scratch-in-practice",
                "ml-learning-fellows-program",
                "learning-creative-learning",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            member_domain: None,
            parallel_overlap: true,
        }
    }
}

impl PipelineConfig {
    /// Parse YAML; missing keys fall back to the defaults
    pub fn from_yaml_str(text: &str) -> PipelineResult<Self> {
        serde_yaml::from_str(text).map_err(|e| PipelineError::Config(e.to_string()))
    }

    /// Read a YAML config file
    pub fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| PipelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn with_reference_date(mut self, reference_date: NaiveDate) -> Self {
        self.reference_date = reference_date;
        self
    }

    pub fn with_detail_level(mut self, detail_level: DetailLevel) -> Self {
        self.detail_level = detail_level;
        self
    }
}
