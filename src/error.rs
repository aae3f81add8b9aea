//! Pipeline error types
//!
//! Every stage of both pipelines reports failures through [`PipelineError`],
//! carrying the failing path or column plus the underlying cause. Stages
//! never retry or recover locally; errors propagate to the binary, which
//! exits non-zero.

use crate::ml::logistic::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the feature and training pipelines
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The raw source could not be read or parsed as tabular data
    #[error("failed to load raw data from {path:?}: {cause}")]
    DataLoad { path: PathBuf, cause: anyhow::Error },

    /// A required column is absent or has the wrong type
    #[error("schema violation: column {column:?} is absent or has the wrong type")]
    Schema { column: String },

    /// A persisted artifact expected at training time is absent or unreadable
    #[error("expected artifact {path:?} is absent or unreadable: {cause}")]
    ArtifactMissing { path: PathBuf, cause: anyhow::Error },

    /// An output path could not be created or written
    #[error("failed to write {path:?}: {cause}")]
    Io { path: PathBuf, cause: anyhow::Error },

    /// The classifier was used outside its fitted contract
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PipelineError {
    pub fn data_load(
        path: impl Into<PathBuf>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::DataLoad {
            path: path.into(),
            cause: anyhow::Error::new(cause),
        }
    }

    pub fn schema(column: impl Into<String>) -> Self {
        Self::Schema {
            column: column.into(),
        }
    }

    pub fn artifact_missing(
        path: impl Into<PathBuf>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ArtifactMissing {
            path: path.into(),
            cause: anyhow::Error::new(cause),
        }
    }

    pub fn io(
        path: impl Into<PathBuf>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Io {
            path: path.into(),
            cause: anyhow::Error::new(cause),
        }
    }
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
