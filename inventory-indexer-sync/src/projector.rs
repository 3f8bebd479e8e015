//! Document projection.
//!
//! The deterministic mapping from a relational item record to a flat index
//! document. Pure, total, no I/O: the caller has already fetched the record
//! with every relation resolved, so there is nothing left to fail on.

use inventory_indexer_shared::{ItemDocument, ItemRecord};

/// Project an item record into its index document.
///
/// Absent relations project to `None` (serialized `null`, not missing).
/// The document id always equals the record id. Numeric fields are carried
/// in the index's declared types here, so a mismatch between the relational
/// layer and the index schema surfaces at projection, not inside the index
/// store.
pub fn project(record: &ItemRecord) -> ItemDocument {
    ItemDocument {
        id: record.id.clone(),
        sku: record.sku.clone(),
        barcode: record.barcode.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        quantity: record.quantity,
        selling_price: record.selling_price,
        reorder_point: record.reorder_point,
        weight: record.weight,
        tax_rate: record.tax_rate,
        image_url: record.image_url.clone(),
        category: record.category.clone(),
        warehouse: record.warehouse.clone(),
        brand: record.brand.clone(),
        supplier: record.supplier.clone(),
        unit: record.unit.clone(),
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}
