//! Categorical encoding
//!
//! A one-hot encoder whose vocabulary is captured once and then applied
//! unchanged to every matrix built from it, so training and prediction rows
//! always agree on column layout.

use ndarray::{Array1, ArrayViewMut1};
use std::collections::{BTreeSet, HashMap};

/// One-hot encoder with a frozen category vocabulary.
///
/// Columns are laid out in sorted category order. A value outside the
/// vocabulary (or a missing value) encodes to an all-zero indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OneHotEncoder {
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

impl OneHotEncoder {
    /// Capture the vocabulary from the observed (non-missing) values
    pub fn fit<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let vocabulary: BTreeSet<&str> = values.into_iter().flatten().collect();
        Self::from_sorted(vocabulary.into_iter().map(str::to_string).collect())
    }

    /// Add categories that were never seen at fit time.
    ///
    /// They get their own columns (all zero for the fit rows). Must be called
    /// before any matrix is built from the encoder.
    pub fn extend<'a, I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut vocabulary: BTreeSet<String> = self.categories.into_iter().collect();
        let before = vocabulary.len();
        vocabulary.extend(values.into_iter().flatten().map(str::to_string));
        if vocabulary.len() > before {
            tracing::debug!(added = vocabulary.len() - before, "padding encoder with unseen categories");
        }
        Self::from_sorted(vocabulary.into_iter().collect())
    }

    fn from_sorted(categories: Vec<String>) -> Self {
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();
        Self { categories, index }
    }

    /// Number of indicator columns
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Vocabulary in column order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Column for a category, if known
    pub fn column_of(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Write the indicator for `value` into `out` (length must be `width()`)
    pub fn encode_into(&self, value: Option<&str>, mut out: ArrayViewMut1<'_, f64>) {
        debug_assert_eq!(out.len(), self.width());
        out.fill(0.0);
        if let Some(col) = value.and_then(|v| self.column_of(v)) {
            out[col] = 1.0;
        }
    }

    pub fn encode(&self, value: Option<&str>) -> Array1<f64> {
        let mut out = Array1::zeros(self.width());
        self.encode_into(value, out.view_mut());
        out
    }
}
