// src/error.rs
use thiserror::Error;

/// Failures that reach the caller. Missing fields and lookup misses are
/// recovered inside the projectors and never show up here.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("could not fetch {target}: {reason}")]
    Fetch { target: String, reason: String },

    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON in match document: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no JSON payload found in the fetched page")]
    NoPayload,

    #[error("the provided data does not appear to be cricket match data")]
    NotMatchData,

    #[error("invalid team roster: {0}")]
    Roster(String),

    #[error("could not serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl AnalysisError {
    /// Parse and classification failures: the input was read but is unusable.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            AnalysisError::Parse(_)
                | AnalysisError::NoPayload
                | AnalysisError::NotMatchData
                | AnalysisError::Roster(_)
        )
    }

    pub fn fetch(target: impl Into<String>, reason: impl ToString) -> Self {
        AnalysisError::Fetch { target: target.into(), reason: reason.to_string() }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
