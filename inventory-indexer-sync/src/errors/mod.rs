//! Error types for the sync layer.

use inventory_indexer_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while synchronizing the search index.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Failure reading from the relational record source.
    #[error("Source error: {0}")]
    SourceError(String),

    /// Failure from the search index.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

impl SyncError {
    /// Create a source error.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::SourceError(msg.into())
    }
}

impl From<sqlx::Error> for SyncError {
    fn from(err: sqlx::Error) -> Self {
        Self::SourceError(err.to_string())
    }
}
