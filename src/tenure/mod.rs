//! Tenure inference
//!
//! Derives a start/end window per person from roster dates, organization
//! status and, where the end is unknown, a regression model fitted on the
//! people whose end is known.

pub mod engine;
pub mod features;

pub use engine::{infer_tenure, TenureInferenceEngine};
pub use features::{FeatureRow, FeatureTransform};
