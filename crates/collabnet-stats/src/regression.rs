//! Ordinary least squares with intercept
//!
//! Fitting returns a `LinearModel`; there is no unfitted state to predict from.

use crate::common::{StatsError, StatsResult};
use crate::linalg::pinv_solve;
use ndarray::{Array1, Array2, Axis};

/// A fitted linear model `y = intercept + x . coefficients`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: Array1<f64>,
    intercept: f64,
    samples: usize,
}

impl LinearModel {
    /// Fit by least squares on centered data.
    ///
    /// Rank-deficient designs (a single row, collinear indicators, constant
    /// columns) yield the minimum-norm coefficient vector, so the fit is
    /// total and deterministic for any non-empty finite input.
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>) -> StatsResult<Self> {
        let samples = x.nrows();
        if samples == 0 {
            return Err(StatsError::EmptyInput);
        }
        if y.len() != samples {
            return Err(StatsError::DimensionMismatch {
                expected: samples,
                found: y.len(),
            });
        }
        if x.iter().any(|v| !v.is_finite()) {
            return Err(StatsError::NonFinite("features"));
        }
        if y.iter().any(|v| !v.is_finite()) {
            return Err(StatsError::NonFinite("target"));
        }

        let x_mean = x.mean_axis(Axis(0)).ok_or(StatsError::EmptyInput)?;
        let y_mean = y.mean().ok_or(StatsError::EmptyInput)?;
        let xc = x - &x_mean;
        let yc = y - y_mean;

        let gram = xc.t().dot(&xc);
        let moment = xc.t().dot(&yc);
        let coefficients = pinv_solve(&gram, &moment);
        let intercept = y_mean - x_mean.dot(&coefficients);

        tracing::debug!(samples, features = coefficients.len(), intercept, "fitted linear model");

        Ok(Self {
            coefficients,
            intercept,
            samples,
        })
    }

    pub fn coefficients(&self) -> &Array1<f64> {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of rows the model was fitted on
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Predict one value per row of `x`
    pub fn predict(&self, x: &Array2<f64>) -> StatsResult<Array1<f64>> {
        if x.ncols() != self.coefficients.len() {
            return Err(StatsError::DimensionMismatch {
                expected: self.coefficients.len(),
                found: x.ncols(),
            });
        }
        Ok(x.dot(&self.coefficients) + self.intercept)
    }
}
