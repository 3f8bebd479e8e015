//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the inventory
//! item index.

use serde_json::{json, Value};

/// The name of the search index.
pub const ITEMS_INDEX: &str = "inventory_items";

/// Get the index settings and mappings for the inventory item index.
///
/// The configuration includes:
/// - **Keyword fields**: `id`, `sku`, `barcode` and relation ids/titles for
///   exact filtering and aggregation
/// - **Dual-mapped title**: full-text analyzed plus a `keyword` sub-field,
///   because search and faceting need different representations of the
///   same string
/// - **Numeric fields**: integers for stock counts, floats for price,
///   weight and tax rate
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "sku": { "type": "keyword" },
                "barcode": { "type": "keyword" },
                "title": {
                    "type": "text",
                    "fields": {
                        "keyword": { "type": "keyword" }
                    }
                },
                "description": { "type": "text" },
                "quantity": { "type": "integer" },
                "sellingPrice": { "type": "float" },
                "reOrderPoint": { "type": "integer" },
                "weight": { "type": "float" },
                "taxRate": { "type": "float" },
                "imageUrl": {
                    "type": "keyword",
                    "index": false
                },
                "category": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "title": { "type": "keyword" }
                    }
                },
                "warehouse": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "title": { "type": "keyword" }
                    }
                },
                "brand": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "title": { "type": "keyword" }
                    }
                },
                "supplier": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "title": { "type": "keyword" }
                    }
                },
                "unit": {
                    "properties": {
                        "id": { "type": "keyword" },
                        "title": { "type": "keyword" }
                    }
                },
                "createdAt": { "type": "date" },
                "updatedAt": { "type": "date" }
            }
        }
    })
}
