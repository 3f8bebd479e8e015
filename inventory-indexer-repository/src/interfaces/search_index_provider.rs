//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, mocks for tests).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::BulkIndexSummary;
use inventory_indexer_shared::{ItemDocument, SearchFilters, SearchPage, SearchResponse};

/// Abstracts the underlying search index implementation.
///
/// Implementations are injected into the sync operations, the bulk loader,
/// and the `SearchIndexClient`, enabling mock-based testing and potential
/// backend migrations. The handle is long-lived, stateless, and safe to
/// share across concurrent tasks; all methods must be `Send + Sync`.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Execute a faceted search query.
    ///
    /// An empty `term` means "match all documents"; the filters still apply.
    /// Facet aggregations are always computed over the same filtered context
    /// as the returned hits.
    async fn search(
        &self,
        term: &str,
        filters: &SearchFilters,
        page: SearchPage,
    ) -> Result<SearchResponse, SearchError>;

    /// Index a single document, replacing any existing document with the
    /// same id (last writer wins).
    async fn index_document(&self, document: &ItemDocument) -> Result<(), SearchError>;

    /// Index many documents as one bulk call.
    ///
    /// Item-level rejections are reported in the summary and do not fail the
    /// call; only a systemic failure (connectivity, malformed request)
    /// returns `Err`.
    async fn bulk_index(&self, documents: &[ItemDocument])
        -> Result<BulkIndexSummary, SearchError>;

    /// Delete a document by item id.
    ///
    /// Deleting an absent document is a success (idempotent delete); only
    /// other error classes are returned.
    async fn delete_document(&self, item_id: &str) -> Result<(), SearchError>;

    /// Create the index with its field mappings if it does not exist.
    /// No-op when the index is already present. Never mutates documents.
    async fn ensure_index(&self) -> Result<(), SearchError>;

    /// Drop the index if it exists. No-op when absent.
    async fn drop_index(&self) -> Result<(), SearchError>;

    /// Check that the search cluster is reachable and healthy.
    async fn health_check(&self) -> Result<bool, SearchError>;
}
