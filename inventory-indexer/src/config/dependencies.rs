//! Dependency initialization and wiring for the inventory indexer.
//!
//! The process entry point owns the long-lived handles (search client,
//! database pool) and injects them into every component; the sync and
//! query components never construct their own connections.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::IndexingError;
use inventory_indexer_repository::{OpenSearchClient, SearchIndexClient, SearchIndexProvider};
use inventory_indexer_sync::{BulkLoader, ItemSyncer, PgItemSource};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default PostgreSQL connection string.
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/inventory";

/// Default database pool size.
const DEFAULT_DB_POOL_SIZE: u32 = 5;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared search index handle.
    pub index: Arc<dyn SearchIndexProvider>,
    /// Query client for the search API.
    pub search_client: SearchIndexClient,
    /// Incremental sync operations.
    pub syncer: ItemSyncer,
    /// Full-corpus rebuild.
    pub loader: BulkLoader,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `DATABASE_URL`: PostgreSQL connection string
    /// - `DB_POOL_SIZE`: database pool size (default: 5)
    pub async fn new() -> Result<Self, IndexingError> {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let pool_size = env::var("DB_POOL_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DB_POOL_SIZE);

        info!(
            opensearch_url = %opensearch_url,
            pool_size,
            "Initializing dependencies"
        );

        let index_client = OpenSearchClient::new(&opensearch_url).map_err(|e| {
            IndexingError::config(format!("Failed to create OpenSearch client: {}", e))
        })?;

        // Verify the cluster is reachable before wiring anything else.
        let healthy = index_client
            .health_check()
            .await
            .map_err(|e| IndexingError::config(format!("OpenSearch health check failed: {}", e)))?;

        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        info!("OpenSearch connection verified");

        let source = PgItemSource::connect(&database_url, pool_size)
            .await
            .map_err(|e| IndexingError::config(format!("Failed to connect to database: {}", e)))?;

        info!("Database connection verified");

        let index: Arc<dyn SearchIndexProvider> = Arc::new(index_client);
        let source = Arc::new(source);

        Ok(Self {
            search_client: SearchIndexClient::new(index.clone()),
            syncer: ItemSyncer::new(source.clone(), index.clone()),
            loader: BulkLoader::new(source, index.clone()),
            index,
        })
    }
}
