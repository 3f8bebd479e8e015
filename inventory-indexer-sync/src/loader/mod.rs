//! Full-corpus bulk loader.
//!
//! Rebuilds the whole index from the relational store in one bulk write.
//! The index is disposable, so a rebuild can run at any time; it is the
//! self-healing mechanism that bounds how long incremental sync failures
//! can leave the index stale.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::SyncError;
use crate::projector::project;
use crate::source::ItemSource;
use inventory_indexer_repository::{SearchError, SearchIndexProvider};
use inventory_indexer_shared::ItemDocument;

/// Result of one full rebuild.
#[derive(Debug, Clone, Default)]
pub struct RebuildSummary {
    /// Items fetched from the relational store.
    pub fetched: usize,
    /// Documents accepted by the index.
    pub indexed: usize,
    /// Documents rejected at the item level.
    pub failed: usize,
    /// Up to three sample item-level errors, for diagnostics.
    pub sample_errors: Vec<String>,
}

/// Loads the entire corpus into the search index.
pub struct BulkLoader {
    source: Arc<dyn ItemSource>,
    index: Arc<dyn SearchIndexProvider>,
}

impl BulkLoader {
    /// Create a loader over the given source and index handles.
    pub fn new(source: Arc<dyn ItemSource>, index: Arc<dyn SearchIndexProvider>) -> Self {
        Self { source, index }
    }

    /// Rebuild the index from the full relational corpus.
    ///
    /// In `clean` mode the index is dropped and recreated first (full
    /// reset); otherwise the index is created only if absent, preserving
    /// documents this run does not touch.
    ///
    /// A connectivity or index-creation failure aborts the rebuild with
    /// `Err`. Per-document rejections inside the bulk call are non-fatal:
    /// they are counted and sampled in the summary.
    ///
    /// The whole corpus is held in memory between fetch and bulk write; a
    /// known scale limit at small-to-moderate corpus sizes.
    pub async fn rebuild(&self, clean: bool) -> Result<RebuildSummary, SyncError> {
        if clean {
            info!("Clean rebuild requested, dropping index");
            self.index.drop_index().await?;
        }

        self.index.ensure_index().await?;

        info!("Fetching items from relational store");
        let records = self.source.fetch_all().await?;
        info!(count = records.len(), "Fetched items to index");

        if records.is_empty() {
            info!("No items to index");
            return Ok(RebuildSummary::default());
        }

        let documents: Vec<ItemDocument> = records.iter().map(project).collect();

        let summary = self.bulk_write(&documents).await?;

        if summary.failed > 0 {
            warn!(
                indexed = summary.indexed,
                failed = summary.failed,
                "Bulk indexing had item-level failures"
            );
            for (i, sample) in summary.sample_errors.iter().enumerate() {
                error!(sample = i + 1, error = %sample, "Bulk index item failure");
            }
        } else {
            info!(indexed = summary.indexed, "Successfully indexed all items");
        }

        Ok(summary)
    }

    async fn bulk_write(&self, documents: &[ItemDocument]) -> Result<RebuildSummary, SearchError> {
        let bulk = self.index.bulk_index(documents).await?;

        Ok(RebuildSummary {
            fetched: documents.len(),
            indexed: bulk.indexed,
            failed: bulk.failed,
            sample_errors: bulk.sample_errors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syncer::test_support::{record, MockSource, RecordingProvider};
    use async_trait::async_trait;
    use inventory_indexer_repository::BulkIndexSummary;
    use inventory_indexer_shared::{SearchFilters, SearchPage, SearchResponse};

    #[tokio::test]
    async fn test_rebuild_indexes_whole_corpus() {
        let source = Arc::new(MockSource::new(vec![
            record("a", "Hammer", None),
            record("b", "Drill", None),
            record("c", "Cable", None),
        ]));
        let provider = Arc::new(RecordingProvider::default());
        let loader = BulkLoader::new(source, provider.clone());

        let summary = loader.rebuild(false).await.unwrap();

        assert_eq!(summary.fetched, 3);
        assert_eq!(summary.indexed, 3);
        assert_eq!(summary.failed, 0);
        assert_eq!(provider.documents.lock().unwrap().len(), 3);
        assert!(!*provider.dropped.lock().unwrap());
    }

    #[tokio::test]
    async fn test_clean_rebuild_drops_index_first() {
        let source = Arc::new(MockSource::new(vec![record("a", "Hammer", None)]));
        let provider = Arc::new(RecordingProvider::default());
        let loader = BulkLoader::new(source, provider.clone());

        loader.rebuild(true).await.unwrap();

        assert!(*provider.dropped.lock().unwrap());
        assert_eq!(provider.documents.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rebuild_empty_corpus() {
        let source = Arc::new(MockSource::new(vec![]));
        let provider = Arc::new(RecordingProvider::default());
        let loader = BulkLoader::new(source, provider);

        let summary = loader.rebuild(false).await.unwrap();
        assert_eq!(summary.fetched, 0);
        assert_eq!(summary.indexed, 0);
    }

    #[tokio::test]
    async fn test_rebuild_is_deterministic() {
        let source = Arc::new(MockSource::new(vec![
            record("a", "Hammer", None),
            record("b", "Drill", None),
        ]));
        let provider = Arc::new(RecordingProvider::default());
        let loader = BulkLoader::new(source.clone(), provider.clone());

        loader.rebuild(true).await.unwrap();
        let first = provider.documents.lock().unwrap().clone();

        loader.rebuild(true).await.unwrap();
        let second = provider.documents.lock().unwrap().clone();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_source_failure_is_fatal() {
        let source = Arc::new(MockSource::failing());
        let provider = Arc::new(RecordingProvider::default());
        let loader = BulkLoader::new(source, provider);

        let result = loader.rebuild(false).await;
        assert!(matches!(result, Err(SyncError::SourceError(_))));
    }

    #[tokio::test]
    async fn test_index_creation_failure_is_fatal() {
        let source = Arc::new(MockSource::new(vec![record("a", "Hammer", None)]));
        let provider = Arc::new(RecordingProvider {
            fail_ensure: true,
            ..Default::default()
        });
        let loader = BulkLoader::new(source, provider);

        let result = loader.rebuild(false).await;
        assert!(matches!(result, Err(SyncError::SearchError(_))));
    }

    #[tokio::test]
    async fn test_systemic_bulk_failure_is_fatal() {
        let source = Arc::new(MockSource::new(vec![record("a", "Hammer", None)]));
        let provider = Arc::new(RecordingProvider {
            fail_writes: true,
            ..Default::default()
        });
        let loader = BulkLoader::new(source, provider);

        let result = loader.rebuild(false).await;
        assert!(result.is_err());
    }

    /// Provider whose bulk call partially rejects documents.
    struct PartialFailureProvider;

    #[async_trait]
    impl SearchIndexProvider for PartialFailureProvider {
        async fn search(
            &self,
            _term: &str,
            _filters: &SearchFilters,
            _page: SearchPage,
        ) -> Result<SearchResponse, SearchError> {
            Ok(SearchResponse::empty())
        }

        async fn index_document(
            &self,
            _document: &inventory_indexer_shared::ItemDocument,
        ) -> Result<(), SearchError> {
            Ok(())
        }

        async fn bulk_index(
            &self,
            documents: &[inventory_indexer_shared::ItemDocument],
        ) -> Result<BulkIndexSummary, SearchError> {
            // Reject exactly one document, accept the rest.
            let mut summary = BulkIndexSummary {
                total: documents.len(),
                indexed: documents.len().saturating_sub(1),
                ..Default::default()
            };
            summary.record_failure("bad-doc: mapper_parsing_exception");
            Ok(summary)
        }

        async fn delete_document(&self, _item_id: &str) -> Result<(), SearchError> {
            Ok(())
        }

        async fn ensure_index(&self) -> Result<(), SearchError> {
            Ok(())
        }

        async fn drop_index(&self) -> Result<(), SearchError> {
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_partial_bulk_failure_is_reported_not_fatal() {
        let source = Arc::new(MockSource::new(vec![
            record("a", "Hammer", None),
            record("b", "Drill", None),
            record("c", "Cable", None),
        ]));
        let loader = BulkLoader::new(source, Arc::new(PartialFailureProvider));

        let summary = loader.rebuild(false).await.unwrap();

        assert_eq!(summary.indexed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.sample_errors.len(), 1);
    }
}
