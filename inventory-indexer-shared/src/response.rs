//! Search response and facet types.

use serde::{Deserialize, Serialize};

use crate::document::ItemDocument;

/// One search hit: the document plus its relevance score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The indexed document.
    pub document: ItemDocument,
    /// Relevance score assigned by the index (0.0 for match-all queries).
    pub score: f64,
}

/// Price range spanned by the matching documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    /// Zero-width range used when no documents match.
    pub fn empty() -> Self {
        Self { min: 0.0, max: 0.0 }
    }
}

/// Facet summary computed over the current filtered result set.
///
/// Recomputed on every query; carries no stored state. Facets always reflect
/// the same filter context as the hits, not the unfiltered corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSummary {
    /// Distinct category titles among matching documents.
    pub categories: Vec<String>,
    /// Distinct brand titles among matching documents.
    pub brands: Vec<String>,
    /// Selling-price range spanned by matching documents.
    pub price_range: PriceRange,
}

impl FacetSummary {
    /// Facets for an empty result set.
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            brands: Vec::new(),
            price_range: PriceRange::empty(),
        }
    }
}

/// Full response for one search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total number of matching documents (may exceed the page size).
    pub total: u64,
    /// The requested page of hits, relevance-ranked when a term was given.
    pub hits: Vec<SearchHit>,
    /// Facets over the full filtered result set.
    pub facets: FacetSummary,
}

impl SearchResponse {
    /// An empty response with empty facets.
    pub fn empty() -> Self {
        Self {
            total: 0,
            hits: Vec::new(),
            facets: FacetSummary::empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response() {
        let response = SearchResponse::empty();
        assert_eq!(response.total, 0);
        assert!(response.hits.is_empty());
        assert!(response.facets.categories.is_empty());
        assert_eq!(response.facets.price_range, PriceRange::empty());
    }

    #[test]
    fn test_empty_price_range_is_zero_width() {
        let range = PriceRange::empty();
        assert_eq!(range.min, range.max);
    }
}
