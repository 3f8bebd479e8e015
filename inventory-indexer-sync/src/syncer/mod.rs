//! Incremental sync operations.
//!
//! Three entry points keep the index following the relational store:
//! single-item upsert, single-item delete, and relation-cascade reindex.
//! Each isolates failures to its own unit of work. None of them ever
//! returns `Err`: the relational write that triggered a sync must not
//! roll back or block on the index, so failures are reported through the
//! typed [`SyncOutcome`] and logged, leaving the index stale until the
//! next successful sync or rebuild.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::errors::SyncError;
use crate::projector::project;
use crate::source::{ItemSource, RelationField};
use inventory_indexer_repository::SearchIndexProvider;

/// Outcome of one incremental sync operation.
///
/// A typed result instead of a bare log line, so an observability
/// collaborator can subscribe to failures without coupling the sync path
/// to the relational write path.
#[derive(Debug)]
pub enum SyncOutcome {
    /// The document was written or replaced.
    Indexed,
    /// The document was removed (or was already absent).
    Deleted,
    /// The source item vanished before indexing; nothing to do.
    SourceMissing,
    /// The operation failed; the index is stale for this item.
    Failed(SyncError),
}

impl SyncOutcome {
    /// True when the operation did not complete.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Synchronizes individual items between the record source and the index.
///
/// Holds shared handles only; safe to use across concurrent requests.
#[derive(Clone)]
pub struct ItemSyncer {
    source: Arc<dyn ItemSource>,
    index: Arc<dyn SearchIndexProvider>,
}

impl ItemSyncer {
    /// Create a syncer over the given source and index handles.
    pub fn new(source: Arc<dyn ItemSource>, index: Arc<dyn SearchIndexProvider>) -> Self {
        Self { source, index }
    }

    /// Fetch, project, and write one item into the index.
    ///
    /// An item that no longer exists is a no-op, not an error: the delete
    /// path will have handled it or will shortly.
    pub async fn upsert_one(&self, item_id: &str) -> SyncOutcome {
        let record = match self.source.fetch_item(item_id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                debug!(item_id = %item_id, "Item not found in source, skipping index");
                return SyncOutcome::SourceMissing;
            }
            Err(e) => {
                warn!(item_id = %item_id, error = %e, "Failed to fetch item for indexing");
                return SyncOutcome::Failed(e);
            }
        };

        let document = project(&record);

        match self.index.index_document(&document).await {
            Ok(()) => {
                debug!(item_id = %item_id, title = %document.title, "Indexed item");
                SyncOutcome::Indexed
            }
            Err(e) => {
                warn!(item_id = %item_id, error = %e, "Failed to index item, index is stale");
                SyncOutcome::Failed(SyncError::from(e))
            }
        }
    }

    /// Remove one item's document from the index.
    ///
    /// A document the index never had counts as deleted (idempotent
    /// delete, enforced by the provider). Any other error class is
    /// reported loudly but still not propagated.
    pub async fn delete_one(&self, item_id: &str) -> SyncOutcome {
        match self.index.delete_document(item_id).await {
            Ok(()) => {
                debug!(item_id = %item_id, "Deleted item from index");
                SyncOutcome::Deleted
            }
            Err(e) => {
                error!(item_id = %item_id, error = %e, "Failed to delete item from index");
                SyncOutcome::Failed(SyncError::from(e))
            }
        }
    }

    /// Reindex every item referencing a changed lookup relation.
    ///
    /// Triggered when a lookup entity edit changes denormalized fields
    /// (for example a brand rename). Items are processed one at a time to
    /// bound the index's concurrent write load; cascade sets are expected
    /// to be small, so per-item fault isolation outweighs bulk-call
    /// efficiency. Returns the number of items processed; individual
    /// failures are logged, not aggregated.
    pub async fn reindex_by_relation(&self, field: RelationField, relation_id: &str) -> usize {
        let records = match self.source.fetch_by_relation(field, relation_id).await {
            Ok(records) => records,
            Err(e) => {
                error!(
                    relation = %field,
                    relation_id = %relation_id,
                    error = %e,
                    "Failed to fetch items for cascade reindex"
                );
                return 0;
            }
        };

        info!(
            relation = %field,
            relation_id = %relation_id,
            count = records.len(),
            "Reindexing items for changed relation"
        );

        let mut processed = 0;
        for record in &records {
            let document = project(record);
            if let Err(e) = self.index.index_document(&document).await {
                warn!(item_id = %record.id, error = %e, "Cascade reindex failed for item");
            }
            processed += 1;
        }

        info!(
            relation = %field,
            relation_id = %relation_id,
            processed,
            "Cascade reindex complete"
        );
        processed
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Mock source and recording index provider shared by sync tests.

    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use inventory_indexer_repository::{BulkIndexSummary, SearchError};
    use inventory_indexer_shared::{
        ItemDocument, ItemRecord, LookupRef, SearchFilters, SearchPage, SearchResponse,
    };
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    pub fn record(id: &str, title: &str, brand: Option<(&str, &str)>) -> ItemRecord {
        ItemRecord {
            id: id.to_string(),
            sku: format!("SKU-{id}"),
            barcode: "0000".to_string(),
            title: title.to_string(),
            description: None,
            quantity: 4,
            selling_price: 9.5,
            reorder_point: 2,
            weight: None,
            tax_rate: None,
            image_url: None,
            category: None,
            warehouse: None,
            brand: brand.map(|(bid, btitle)| LookupRef::new(bid, btitle)),
            supplier: None,
            unit: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    /// Source backed by a fixed record list.
    pub struct MockSource {
        pub records: Mutex<Vec<ItemRecord>>,
        pub fail: bool,
    }

    impl MockSource {
        pub fn new(records: Vec<ItemRecord>) -> Self {
            Self {
                records: Mutex::new(records),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl ItemSource for MockSource {
        async fn fetch_item(&self, item_id: &str) -> Result<Option<ItemRecord>, SyncError> {
            if self.fail {
                return Err(SyncError::source("mock source failure"));
            }
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .find(|r| r.id == item_id)
                .cloned())
        }

        async fn fetch_by_relation(
            &self,
            field: RelationField,
            relation_id: &str,
        ) -> Result<Vec<ItemRecord>, SyncError> {
            if self.fail {
                return Err(SyncError::source("mock source failure"));
            }
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|r| match field {
                    RelationField::BrandId => {
                        r.brand.as_ref().map(|b| b.id.as_str()) == Some(relation_id)
                    }
                    RelationField::CategoryId => {
                        r.category.as_ref().map(|c| c.id.as_str()) == Some(relation_id)
                    }
                    RelationField::WarehouseId => {
                        r.warehouse.as_ref().map(|w| w.id.as_str()) == Some(relation_id)
                    }
                    RelationField::SupplierId => {
                        r.supplier.as_ref().map(|s| s.id.as_str()) == Some(relation_id)
                    }
                    RelationField::UnitId => {
                        r.unit.as_ref().map(|u| u.id.as_str()) == Some(relation_id)
                    }
                })
                .cloned()
                .collect())
        }

        async fn fetch_all(&self) -> Result<Vec<ItemRecord>, SyncError> {
            if self.fail {
                return Err(SyncError::source("mock source failure"));
            }
            Ok(self.records.lock().unwrap().clone())
        }
    }

    /// Index provider that records documents in memory.
    #[derive(Default)]
    pub struct RecordingProvider {
        pub documents: Mutex<BTreeMap<String, ItemDocument>>,
        pub fail_writes: bool,
        pub fail_deletes: bool,
        pub fail_ensure: bool,
        pub dropped: Mutex<bool>,
    }

    #[async_trait]
    impl SearchIndexProvider for RecordingProvider {
        async fn search(
            &self,
            _term: &str,
            _filters: &SearchFilters,
            _page: SearchPage,
        ) -> Result<SearchResponse, SearchError> {
            Ok(SearchResponse::empty())
        }

        async fn index_document(&self, document: &ItemDocument) -> Result<(), SearchError> {
            if self.fail_writes {
                return Err(SearchError::index("mock write failure"));
            }
            self.documents
                .lock()
                .unwrap()
                .insert(document.id.clone(), document.clone());
            Ok(())
        }

        async fn bulk_index(
            &self,
            documents: &[ItemDocument],
        ) -> Result<BulkIndexSummary, SearchError> {
            if self.fail_writes {
                return Err(SearchError::bulk_index("mock bulk failure"));
            }
            for doc in documents {
                self.index_document(doc).await?;
            }
            Ok(BulkIndexSummary {
                total: documents.len(),
                indexed: documents.len(),
                ..Default::default()
            })
        }

        async fn delete_document(&self, item_id: &str) -> Result<(), SearchError> {
            if self.fail_deletes {
                return Err(SearchError::connection("mock connectivity failure"));
            }
            // An absent document is a successful delete.
            self.documents.lock().unwrap().remove(item_id);
            Ok(())
        }

        async fn ensure_index(&self) -> Result<(), SearchError> {
            if self.fail_ensure {
                return Err(SearchError::index_lifecycle("mock creation failure"));
            }
            Ok(())
        }

        async fn drop_index(&self) -> Result<(), SearchError> {
            *self.dropped.lock().unwrap() = true;
            self.documents.lock().unwrap().clear();
            Ok(())
        }

        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }
    }
}
