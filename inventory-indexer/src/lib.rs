//! # Inventory Indexer
//!
//! Entry point crate for the inventory search indexer. Provides dependency
//! wiring from the environment, the public search API surface consumed by
//! the UI collaborator, and the `rebuild-index` operational binary.

pub mod api;
pub mod config;

pub use api::{search_items, SearchApiResponse, SearchParams};
pub use config::Dependencies;

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Sync layer error.
    #[error("Sync error: {0}")]
    SyncError(#[from] inventory_indexer_sync::SyncError),

    /// Search index error.
    #[error("Search error: {0}")]
    SearchError(#[from] inventory_indexer_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
