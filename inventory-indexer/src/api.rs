//! Public search API surface.
//!
//! The UI collaborator sends loosely typed query parameters; this module
//! coerces them into the enumerated filter set once, at the boundary, and
//! shapes the outcome into a success-flagged response. A failed search
//! returns `success: false` with empty results rather than an error
//! surfacing to the interface.

use serde::{Deserialize, Serialize};
use tracing::error;

use inventory_indexer_repository::SearchIndexClient;
use inventory_indexer_shared::{
    FacetSummary, ItemDocument, SearchFilters, SearchPage, DEFAULT_PAGE_SIZE,
};

/// Raw query parameters as delivered by the caller.
///
/// Everything is an optional string; absent or unparseable values are
/// treated as "filter not applied", never rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text search term.
    pub q: Option<String>,
    /// Result size cap.
    pub size: Option<String>,
    /// Category id filter.
    pub category: Option<String>,
    /// Warehouse id filter.
    pub warehouse: Option<String>,
    /// Brand id filter.
    pub brand: Option<String>,
    /// Minimum selling price.
    pub min_price: Option<String>,
    /// Maximum selling price.
    pub max_price: Option<String>,
    /// Only in-stock items ("true" to enable).
    pub in_stock: Option<String>,
    /// Only low-stock items ("true" to enable).
    pub low_stock: Option<String>,
}

impl SearchParams {
    /// Coerce the raw parameters into the typed filter set and page.
    pub fn coerce(&self) -> (String, SearchFilters, SearchPage) {
        let term = self.q.clone().unwrap_or_default();

        let filters = SearchFilters {
            category_id: non_empty(&self.category),
            warehouse_id: non_empty(&self.warehouse),
            brand_id: non_empty(&self.brand),
            min_price: parse_price(&self.min_price),
            max_price: parse_price(&self.max_price),
            in_stock: parse_flag(&self.in_stock),
            low_stock: parse_flag(&self.low_stock),
        };

        let size = self
            .size
            .as_deref()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        (term, filters, SearchPage::with_size(size))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_price(value: &Option<String>) -> Option<f64> {
    value
        .as_deref()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_flag(value: &Option<String>) -> bool {
    matches!(value.as_deref().map(str::trim), Some("true") | Some("1"))
}

/// Response contract consumed by the UI collaborator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApiResponse {
    /// Whether the search executed successfully.
    pub success: bool,
    /// Ranked matching documents (empty on failure).
    pub results: Vec<ItemDocument>,
    /// Facets over the filtered result set (empty on failure).
    pub facets: FacetSummary,
}

impl SearchApiResponse {
    fn failure() -> Self {
        Self {
            success: false,
            results: Vec::new(),
            facets: FacetSummary::empty(),
        }
    }
}

/// Execute a search for the given raw parameters.
///
/// Never returns an error: failures are logged and reported as a
/// `success: false` response. The caller does not retry.
pub async fn search_items(client: &SearchIndexClient, params: &SearchParams) -> SearchApiResponse {
    let (term, filters, page) = params.coerce();

    match client.search(&term, &filters, page).await {
        Ok(response) => SearchApiResponse {
            success: true,
            results: response.hits.into_iter().map(|h| h.document).collect(),
            facets: response.facets,
        },
        Err(e) => {
            error!(error = %e, "Search request failed");
            SearchApiResponse::failure()
        }
    }
}
