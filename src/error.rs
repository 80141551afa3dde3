//! Error taxonomy for the batch pipeline
//!
//! Every failure is a data-quality problem in the input; nothing here is
//! retried.

use collabnet_stats::StatsError;
use thiserror::Error;

/// Errors that can occur while inferring tenure or building the network
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No departed/unknown-status person has an observed duration to learn from
    #[error("insufficient data: no known durations to fit the imputation model ({candidates} candidates)")]
    InsufficientData { candidates: usize },

    /// Overlap requested for someone with no tenure row
    #[error("unknown person: {0}")]
    UnknownPerson(String),

    /// Roster row without an identifying field
    #[error("malformed record #{row}: missing {field}")]
    MalformedRecord { row: usize, field: &'static str },

    /// A date field that is present but unparseable
    #[error("invalid {field} '{value}': {source}")]
    DateParse {
        field: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("imputation model error: {0}")]
    Model(#[from] StatsError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
