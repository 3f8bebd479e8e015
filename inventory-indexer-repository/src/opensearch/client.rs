//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of
//! [`SearchIndexProvider`] using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, ITEMS_INDEX};
use crate::opensearch::queries::build_search_query;
use crate::opensearch::response::parse_search_response;
use crate::types::BulkIndexSummary;
use inventory_indexer_shared::{ItemDocument, SearchFilters, SearchPage, SearchResponse};

/// OpenSearch-backed search index provider for inventory items.
///
/// The client is a long-lived, stateless handle, safe to share across
/// concurrent tasks behind an `Arc`. It owns no transaction semantics; every
/// call is one round trip.
pub struct OpenSearchClient {
    client: OpenSearch,
    index_name: String,
}

impl OpenSearchClient {
    /// Create a new client connected to the given URL, targeting the
    /// default `inventory_items` index.
    pub fn new(url: &str) -> Result<Self, SearchError> {
        Self::with_index(url, ITEMS_INDEX)
    }

    /// Create a new client targeting a custom index name (used by tests
    /// and by blue/green style rebuilds).
    pub fn with_index(url: &str, index_name: &str) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %index_name, "Created OpenSearch client");

        Ok(Self {
            client,
            index_name: index_name.to_string(),
        })
    }

    /// Check whether the index currently exists.
    async fn index_exists(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&self.index_name]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    /// Summarize a bulk response body, counting item-level rejections.
    fn summarize_bulk_response(body: &Value, total: usize) -> BulkIndexSummary {
        let mut summary = BulkIndexSummary {
            total,
            indexed: total,
            ..Default::default()
        };

        let had_errors = body["errors"].as_bool().unwrap_or(false);
        if !had_errors {
            return summary;
        }

        summary.indexed = 0;
        if let Some(items) = body["items"].as_array() {
            for item in items {
                match item["index"].get("error") {
                    Some(err) => {
                        let doc_id = item["index"]["_id"].as_str().unwrap_or("?");
                        summary.record_failure(format!("{}: {}", doc_id, err));
                    }
                    None => summary.indexed += 1,
                }
            }
        }

        summary
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    async fn search(
        &self,
        term: &str,
        filters: &SearchFilters,
        page: SearchPage,
    ) -> Result<SearchResponse, SearchError> {
        let body = build_search_query(term, filters, page);

        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_name]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(parse_search_response(&body))
    }

    async fn index_document(&self, document: &ItemDocument) -> Result<(), SearchError> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_name, &document.id))
            .body(document)
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(item_id = %document.id, "Document indexed");
        Ok(())
    }

    async fn bulk_index(
        &self,
        documents: &[ItemDocument],
    ) -> Result<BulkIndexSummary, SearchError> {
        if documents.is_empty() {
            return Ok(BulkIndexSummary::empty());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for doc in documents {
            body.push(json!({ "index": { "_index": self.index_name, "_id": doc.id } }).into());
            let source =
                serde_json::to_value(doc).map_err(|e| SearchError::bulk_index(e.to_string()))?;
            body.push(source.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(Self::summarize_bulk_response(&body, documents.len()))
    }

    async fn delete_document(&self, item_id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_name, item_id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable: the document may never have been indexed.
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(item_id = %item_id, "Document deleted");
        Ok(())
    }

    async fn ensure_index(&self) -> Result<(), SearchError> {
        if self.index_exists().await? {
            debug!(index = %self.index_name, "Index already exists");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::index_lifecycle(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index_lifecycle(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Index created");
        Ok(())
    }

    async fn drop_index(&self) -> Result<(), SearchError> {
        if !self.index_exists().await? {
            debug!(index = %self.index_name, "Index absent, nothing to drop");
            return Ok(());
        }

        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[&self.index_name]))
            .send()
            .await
            .map_err(|e| SearchError::index_lifecycle(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index deletion failed");
            return Err(SearchError::index_lifecycle(format!(
                "Index deletion failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Index dropped");
        Ok(())
    }

    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let status = body["status"].as_str().unwrap_or("unknown");
        info!(status = %status, "Cluster health");

        Ok(status == "green" || status == "yellow")
    }
}
