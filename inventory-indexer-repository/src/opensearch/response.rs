//! OpenSearch response shaping.
//!
//! Maps raw OpenSearch hit and aggregation structures into the public
//! [`SearchResponse`] contract.

use serde_json::Value;
use tracing::warn;

use inventory_indexer_shared::{
    FacetSummary, ItemDocument, PriceRange, SearchHit, SearchResponse,
};

/// Shape a raw OpenSearch search response body.
///
/// Malformed hits are skipped with a warning rather than failing the whole
/// response. Missing or empty aggregations (zero matching documents) yield
/// empty facet lists and a zero-width price range.
pub fn parse_search_response(body: &Value) -> SearchResponse {
    let total = body["hits"]["total"]["value"].as_u64().unwrap_or(0);

    let hits = body["hits"]["hits"]
        .as_array()
        .map(|raw_hits| raw_hits.iter().filter_map(parse_hit).collect())
        .unwrap_or_default();

    let facets = parse_facets(&body["aggregations"]);

    SearchResponse {
        total,
        hits,
        facets,
    }
}

/// Parse one raw hit into a document plus score.
fn parse_hit(hit: &Value) -> Option<SearchHit> {
    let source = hit.get("_source")?;
    let document: ItemDocument = match serde_json::from_value(source.clone()) {
        Ok(doc) => doc,
        Err(e) => {
            warn!(error = %e, "Skipping malformed hit in search response");
            return None;
        }
    };

    // match_all hits carry a null _score when an explicit sort is applied.
    let score = hit["_score"].as_f64().unwrap_or(0.0);

    Some(SearchHit { document, score })
}

/// Parse the aggregation section into a facet summary.
fn parse_facets(aggregations: &Value) -> FacetSummary {
    let categories = parse_terms_buckets(&aggregations["categories"]);
    let brands = parse_terms_buckets(&aggregations["brands"]);

    // min/max aggregations report null over an empty result set.
    let min = aggregations["min_price"]["value"].as_f64();
    let max = aggregations["max_price"]["value"].as_f64();
    let price_range = match (min, max) {
        (Some(min), Some(max)) => PriceRange { min, max },
        _ => PriceRange::empty(),
    };

    FacetSummary {
        categories,
        brands,
        price_range,
    }
}

/// Extract bucket keys from a terms aggregation.
fn parse_terms_buckets(aggregation: &Value) -> Vec<String> {
    aggregation["buckets"]
        .as_array()
        .map(|buckets| {
            buckets
                .iter()
                .filter_map(|bucket| bucket["key"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
