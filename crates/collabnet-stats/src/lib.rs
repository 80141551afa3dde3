//! Numeric kernels for the collabnet tenure pipeline
//!
//! Nothing in here knows about people or projects: the root crate turns its
//! tenure rows into design matrices and calls into these kernels.

pub mod common;
pub mod encoding;
pub mod linalg;
pub mod regression;

pub use common::{StatsError, StatsResult};
pub use encoding::OneHotEncoder;
pub use linalg::{pinv_solve, symmetric_eigen};
pub use regression::LinearModel;
