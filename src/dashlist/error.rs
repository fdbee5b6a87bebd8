use crate::model::EntityKind;
use thiserror::Error;

/// Input rejected by the view engine before any derivation runs.
///
/// These are the only errors the engine raises on its own; everything else
/// comes from the storage collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("page size must be at least 1 (got {0})")]
    PageSize(usize),

    #[error("page size {size} is not one of the allowed sizes {allowed:?}")]
    PageSizeNotAllowed { size: usize, allowed: Vec<usize> },

    #[error("page index must be at least 1 (got {0})")]
    PageIndex(usize),

    #[error("invalid filter '{input}': {reason}")]
    Criterion { input: String, reason: String },

    #[error("invalid time window '{0}' (expected e.g. 1d, 1w, 1m, 6m)")]
    Window(String),

    #[error("invalid sort key '{0}'")]
    Sort(String),
}

impl ValidationError {
    pub(crate) fn criterion(input: &str, reason: impl Into<String>) -> Self {
        ValidationError::Criterion {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DashError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Record not found in {kind}: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, DashError>;
