//! OpenSearch query builders.
//!
//! This module translates a free-text term plus a sparse filter set into a
//! single structured search request with facet aggregations and pagination.

use serde_json::{json, Value};

use inventory_indexer_shared::{SearchFilters, SearchPage};

/// Build a complete OpenSearch request body.
///
/// The request combines:
/// - a full-text clause over title/description (or `match_all` when the
///   term is empty)
/// - one `filter` clause per present filter field, ANDed together
/// - facet aggregations, attached unconditionally so facets always reflect
///   the same filter context as the hits
/// - `from`/`size` pagination with a deterministic sort when no term is
///   given (relevance order is meaningless for `match_all`)
pub fn build_search_query(term: &str, filters: &SearchFilters, page: SearchPage) -> Value {
    let mut body = json!({
        "query": {
            "bool": {
                "must": [build_text_query(term)],
                "filter": build_filter_clauses(filters)
            }
        },
        "aggs": build_aggregations(),
        "from": page.from,
        "size": page.size
    });

    // Without a text term every hit scores identically, so paginate on
    // update recency with the id as a tie-breaker.
    if term.trim().is_empty() {
        body["sort"] = json!([
            { "updatedAt": { "order": "desc" } },
            { "id": { "order": "asc" } }
        ]);
    }

    body
}

/// Build the full-text clause for the query term.
///
/// Matches the analyzed title (boosted) and description fields with AUTO
/// fuzziness for typo tolerance. An empty or whitespace term matches all
/// documents so that filters alone still apply.
fn build_text_query(term: &str) -> Value {
    let term = term.trim();
    if term.is_empty() {
        return json!({ "match_all": {} });
    }

    json!({
        "multi_match": {
            "query": term,
            "fields": ["title^2", "description"],
            "type": "best_fields",
            "fuzziness": "AUTO"
        }
    })
}

/// Build the filter clauses for every present filter field.
///
/// Absent fields contribute nothing. A min/max pair with min > max is kept
/// verbatim: the range matches no documents, which is the correct outcome
/// for a caller error, rather than a rejection.
fn build_filter_clauses(filters: &SearchFilters) -> Vec<Value> {
    let mut clauses = Vec::new();

    if let Some(ref category_id) = filters.category_id {
        clauses.push(json!({ "term": { "category.id": category_id } }));
    }
    if let Some(ref warehouse_id) = filters.warehouse_id {
        clauses.push(json!({ "term": { "warehouse.id": warehouse_id } }));
    }
    if let Some(ref brand_id) = filters.brand_id {
        clauses.push(json!({ "term": { "brand.id": brand_id } }));
    }

    if filters.min_price.is_some() || filters.max_price.is_some() {
        let mut range = serde_json::Map::new();
        if let Some(min) = filters.min_price {
            range.insert("gte".to_string(), json!(min));
        }
        if let Some(max) = filters.max_price {
            range.insert("lte".to_string(), json!(max));
        }
        clauses.push(json!({ "range": { "sellingPrice": range } }));
    }

    if filters.in_stock {
        clauses.push(json!({ "range": { "quantity": { "gt": 0 } } }));
    }

    if filters.low_stock {
        // Cross-field comparison: quantity <= reOrderPoint.
        clauses.push(json!({
            "script": {
                "script": {
                    "source": "doc['quantity'].value <= doc['reOrderPoint'].value",
                    "lang": "painless"
                }
            }
        }));
    }

    clauses
}

/// Build the facet aggregations.
///
/// Aggregations run inside the query context, so they are scoped to the
/// current filtered result set, not the whole corpus.
fn build_aggregations() -> Value {
    json!({
        "categories": {
            "terms": { "field": "category.title" }
        },
        "brands": {
            "terms": { "field": "brand.title" }
        },
        "min_price": {
            "min": { "field": "sellingPrice" }
        },
        "max_price": {
            "max": { "field": "sellingPrice" }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_term_matches_all() {
        let query = build_search_query("", &SearchFilters::default(), SearchPage::default());

        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert!(must[0]["match_all"].is_object());
    }

    #[test]
    fn test_whitespace_term_matches_all() {
        let query = build_search_query("   ", &SearchFilters::default(), SearchPage::default());

        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert!(must[0]["match_all"].is_object());
    }

    #[test]
    fn test_text_term_builds_multi_match() {
        let query = build_search_query("hammer", &SearchFilters::default(), SearchPage::default());

        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must[0]["multi_match"]["query"], "hammer");
        assert_eq!(must[0]["multi_match"]["fuzziness"], "AUTO");

        let fields = must[0]["multi_match"]["fields"].as_array().unwrap();
        assert_eq!(fields[0], "title^2");
        assert_eq!(fields[1], "description");
    }

    #[test]
    fn test_no_filters_means_no_filter_clauses() {
        let query = build_search_query("hammer", &SearchFilters::default(), SearchPage::default());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_exact_filters_become_term_clauses() {
        let filters = SearchFilters {
            category_id: Some("cat-1".to_string()),
            warehouse_id: Some("wh-1".to_string()),
            brand_id: Some("br-1".to_string()),
            ..Default::default()
        };
        let query = build_search_query("", &filters, SearchPage::default());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filter.len(), 3);
        assert_eq!(filter[0]["term"]["category.id"], "cat-1");
        assert_eq!(filter[1]["term"]["warehouse.id"], "wh-1");
        assert_eq!(filter[2]["term"]["brand.id"], "br-1");
    }

    #[test]
    fn test_price_bounds_share_one_range_clause() {
        let filters = SearchFilters {
            min_price: Some(10.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        let query = build_search_query("", &filters, SearchPage::default());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filter.len(), 1);
        assert_eq!(filter[0]["range"]["sellingPrice"]["gte"], 10.0);
        assert_eq!(filter[0]["range"]["sellingPrice"]["lte"], 50.0);
    }

    #[test]
    fn test_min_price_alone() {
        let filters = SearchFilters {
            min_price: Some(15.0),
            ..Default::default()
        };
        let query = build_search_query("", &filters, SearchPage::default());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filter[0]["range"]["sellingPrice"]["gte"], 15.0);
        assert!(filter[0]["range"]["sellingPrice"].get("lte").is_none());
    }

    #[test]
    fn test_inverted_price_range_is_kept_not_rejected() {
        let filters = SearchFilters {
            min_price: Some(50.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        let query = build_search_query("", &filters, SearchPage::default());

        // The empty-compatible range goes through verbatim.
        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filter[0]["range"]["sellingPrice"]["gte"], 50.0);
        assert_eq!(filter[0]["range"]["sellingPrice"]["lte"], 10.0);
    }

    #[test]
    fn test_in_stock_filter() {
        let filters = SearchFilters {
            in_stock: true,
            ..Default::default()
        };
        let query = build_search_query("", &filters, SearchPage::default());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filter[0]["range"]["quantity"]["gt"], 0);
    }

    #[test]
    fn test_low_stock_filter_compares_against_reorder_point() {
        let filters = SearchFilters {
            low_stock: true,
            ..Default::default()
        };
        let query = build_search_query("", &filters, SearchPage::default());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        let source = filter[0]["script"]["script"]["source"].as_str().unwrap();
        assert!(source.contains("quantity"));
        assert!(source.contains("reOrderPoint"));
    }

    #[test]
    fn test_aggregations_attached_unconditionally() {
        let with_term =
            build_search_query("hammer", &SearchFilters::default(), SearchPage::default());
        let without_term = build_search_query("", &SearchFilters::default(), SearchPage::default());

        for query in [with_term, without_term] {
            assert_eq!(query["aggs"]["categories"]["terms"]["field"], "category.title");
            assert_eq!(query["aggs"]["brands"]["terms"]["field"], "brand.title");
            assert_eq!(query["aggs"]["min_price"]["min"]["field"], "sellingPrice");
            assert_eq!(query["aggs"]["max_price"]["max"]["field"], "sellingPrice");
        }
    }

    #[test]
    fn test_pagination_fields() {
        let page = SearchPage { from: 20, size: 25 };
        let query = build_search_query("hammer", &SearchFilters::default(), page);

        assert_eq!(query["from"], 20);
        assert_eq!(query["size"], 25);
    }

    #[test]
    fn test_sort_is_deterministic_without_term() {
        let query = build_search_query("", &SearchFilters::default(), SearchPage::default());

        let sort = query["sort"].as_array().unwrap();
        assert_eq!(sort[0]["updatedAt"]["order"], "desc");
        assert_eq!(sort[1]["id"]["order"], "asc");
    }

    #[test]
    fn test_relevance_order_with_term() {
        let query = build_search_query("hammer", &SearchFilters::default(), SearchPage::default());
        assert!(query.get("sort").is_none());
    }

    #[test]
    fn test_filters_combine_with_term() {
        let filters = SearchFilters {
            category_id: Some("cat-1".to_string()),
            in_stock: true,
            ..Default::default()
        };
        let query = build_search_query("drill", &filters, SearchPage::default());

        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert!(must[0]["multi_match"].is_object());

        let filter = query["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filter.len(), 2);
    }
}
