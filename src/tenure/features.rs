//! Feature transform for the imputation model
//!
//! Columns: group one-hot (frozen vocabulary), `ln(project_count)`,
//! `days_since_start`.

use collabnet_stats::OneHotEncoder;
use ndarray::{s, Array2};

/// The inputs the model sees for one person
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow<'a> {
    pub group: Option<&'a str>,
    pub project_count: usize,
    pub days_since_start: i64,
}

/// Feature layout fixed at fit time and shared by fit and predict
#[derive(Debug, Clone)]
pub struct FeatureTransform {
    groups: OneHotEncoder,
}

impl FeatureTransform {
    /// Vocabulary from the training rows, padded with groups that only
    /// appear among the rows to predict.
    pub fn fit(training: &[FeatureRow<'_>], predict: &[FeatureRow<'_>]) -> Self {
        let groups = OneHotEncoder::fit(training.iter().map(|r| r.group))
            .extend(predict.iter().map(|r| r.group));
        Self { groups }
    }

    pub fn width(&self) -> usize {
        self.groups.width() + 2
    }

    pub fn categories(&self) -> &[String] {
        self.groups.categories()
    }

    pub fn matrix(&self, rows: &[FeatureRow<'_>]) -> Array2<f64> {
        let groups = self.groups.width();
        let mut x = Array2::zeros((rows.len(), self.width()));
        for (i, row) in rows.iter().enumerate() {
            self.groups.encode_into(row.group, x.slice_mut(s![i, ..groups]));
            // project_count >= 1 for anyone with a roster row
            x[[i, groups]] = (row.project_count.max(1) as f64).ln();
            x[[i, groups + 1]] = row.days_since_start as f64;
        }
        x
    }
}
