//! Item record and index document types.
//!
//! `ItemRecord` is the shape of an inventory item as read from the
//! relational store with all lookup relations resolved. `ItemDocument` is
//! the flattened projection stored in the search index. The document is a
//! derived, disposable copy: the relational store owns the item, and the
//! index can be dropped and fully regenerated at any time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved lookup relation (category, warehouse, brand, supplier, unit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupRef {
    /// The lookup entity's identifier.
    pub id: String,
    /// The lookup entity's display title.
    pub title: String,
}

impl LookupRef {
    /// Create a lookup reference from id and title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// An inventory item as fetched from the relational store, with all
/// optional lookup relations already resolved by the record source.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// The item's identifier, owned by the relational store.
    pub id: String,
    /// Stock keeping unit code.
    pub sku: String,
    /// Barcode string.
    pub barcode: String,
    /// Display title.
    pub title: String,
    /// Optional long description.
    pub description: Option<String>,
    /// Quantity on hand.
    pub quantity: i64,
    /// Selling price.
    pub selling_price: f64,
    /// Reorder threshold ("low stock" means quantity <= reorder_point).
    pub reorder_point: i64,
    /// Optional item weight.
    pub weight: Option<f64>,
    /// Optional tax rate.
    pub tax_rate: Option<f64>,
    /// Optional image reference.
    pub image_url: Option<String>,
    /// Category relation, if set.
    pub category: Option<LookupRef>,
    /// Warehouse relation, if set.
    pub warehouse: Option<LookupRef>,
    /// Brand relation, if set.
    pub brand: Option<LookupRef>,
    /// Supplier relation, if set.
    pub supplier: Option<LookupRef>,
    /// Unit relation, if set.
    pub unit: Option<LookupRef>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The denormalized document stored in the search index.
///
/// Field names are part of the external index schema contract and must
/// serialize exactly as declared in the index mapping. The document's `id`
/// always equals the source item's id; document identity is never generated
/// independently. Documents are point-in-time snapshots with no versioning:
/// last writer wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDocument {
    pub id: String,
    pub sku: String,
    pub barcode: String,
    pub title: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub selling_price: f64,
    #[serde(rename = "reOrderPoint")]
    pub reorder_point: i64,
    pub weight: Option<f64>,
    pub tax_rate: Option<f64>,
    pub image_url: Option<String>,
    pub category: Option<LookupRef>,
    pub warehouse: Option<LookupRef>,
    pub brand: Option<LookupRef>,
    pub supplier: Option<LookupRef>,
    pub unit: Option<LookupRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
