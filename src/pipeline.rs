//! Batch pipeline
//!
//! ```text
//! RecordStore ──rows──> TenureInferenceEngine ──table──> OverlapCalculator
//!      └──rows──> ProjectFilter ──> CollaborationNetworkBuilder ──> AdjacencyDocument
//! ```
//!
//! Tenure is inferred from the unfiltered rosters; the exclusion list only
//! affects the collaboration network.

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::model::{OverlapEdge, PersonStatus, ProjectRecord, TenureTable};
use crate::network::{AdjacencyDocument, CollaborationNetwork, CollaborationNetworkBuilder, ProjectFilter};
use crate::overlap::OverlapCalculator;
use crate::records::{RecordStore, StatusTable};
use crate::tenure::TenureInferenceEngine;

/// Everything one run produces
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub tenure: TenureTable,
    pub network: CollaborationNetwork,
    pub adjacency: AdjacencyDocument,
}

/// Runs tenure inference and network construction under one configuration
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Exclusion list, then co-membership aggregation
    pub fn network(&self, records: &[ProjectRecord]) -> CollaborationNetwork {
        let kept = ProjectFilter::from_config(&self.config).apply(records);
        CollaborationNetworkBuilder::from_config(&self.config).build(&kept)
    }

    pub fn tenure(
        &self,
        records: &[ProjectRecord],
        statuses: &[PersonStatus],
    ) -> PipelineResult<TenureTable> {
        let classifier = StatusTable::from_statuses(statuses);
        TenureInferenceEngine::from_config(&self.config).infer(records, &classifier)
    }

    /// Pairwise overlaps over the table, or over `subset` when given
    pub fn overlaps(
        &self,
        table: &TenureTable,
        subset: Option<&[String]>,
    ) -> PipelineResult<Vec<OverlapEdge>> {
        let calculator = OverlapCalculator::new(table).parallel(self.config.parallel_overlap);
        match subset {
            Some(ids) => calculator.compute_subset(ids),
            None => Ok(calculator.compute_all()),
        }
    }

    /// Load from `store` and produce tenure table, network and adjacency
    pub fn run(&self, store: &dyn RecordStore) -> PipelineResult<PipelineOutput> {
        let records = store.project_records()?;
        let statuses = store.person_statuses()?;
        tracing::info!(
            records = records.len(),
            statuses = statuses.len(),
            reference_date = %self.config.reference_date,
            "starting pipeline run"
        );

        let tenure = self.tenure(&records, &statuses)?;
        let network = self.network(&records);
        let adjacency = network.serialize();

        Ok(PipelineOutput {
            tenure,
            network,
            adjacency,
        })
    }
}
