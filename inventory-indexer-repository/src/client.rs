//! Search index client facade.
//!
//! Application code queries the index through this client rather than
//! holding the backend provider directly.

use std::sync::Arc;

use crate::errors::SearchError;
use crate::interfaces::SearchIndexProvider;
use inventory_indexer_shared::{SearchFilters, SearchPage, SearchResponse};

/// Configuration for the search client.
#[derive(Debug, Clone)]
pub struct SearchClientConfig {
    /// Upper bound on the number of hits one request may ask for.
    pub max_page_size: usize,
}

impl Default for SearchClientConfig {
    fn default() -> Self {
        Self { max_page_size: 100 }
    }
}

/// The main client for querying the search index.
///
/// Holds a shared provider handle; safe to clone and use across concurrent
/// requests.
#[derive(Clone)]
pub struct SearchIndexClient {
    provider: Arc<dyn SearchIndexProvider>,
    config: SearchClientConfig,
}

impl SearchIndexClient {
    /// Create a new client with default configuration.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: SearchClientConfig::default(),
        }
    }

    /// Create a new client with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: SearchClientConfig) -> Self {
        Self { provider, config }
    }

    /// Execute a faceted search.
    ///
    /// The requested page size is clamped to the configured maximum; a size
    /// of zero falls back to the default page size.
    pub async fn search(
        &self,
        term: &str,
        filters: &SearchFilters,
        page: SearchPage,
    ) -> Result<SearchResponse, SearchError> {
        let mut page = page;
        if page.size == 0 {
            page.size = SearchPage::default().size;
        }
        page.size = page.size.min(self.config.max_page_size);

        self.provider.search(term, filters, page).await
    }
}
