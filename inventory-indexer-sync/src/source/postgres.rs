//! PostgreSQL implementation of the item record source.
//!
//! One SELECT joins the five lookup tables so every record comes back with
//! its relations resolved, mirroring what the relational schema owns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::debug;

use crate::errors::SyncError;
use crate::source::{ItemSource, RelationField};
use inventory_indexer_shared::{ItemRecord, LookupRef};

/// Base SELECT shared by every fetch; relation columns are aliased so row
/// mapping stays uniform.
const SELECT_ITEMS: &str = r#"
SELECT i.id, i.sku, i.barcode, i.title, i.description,
       i.quantity, i."sellingPrice", i."reOrderPoint",
       i.weight, i."taxRate", i."imageUrl",
       i."createdAt", i."updatedAt",
       c.id AS category_id, c.title AS category_title,
       w.id AS warehouse_id, w.title AS warehouse_title,
       b.id AS brand_id, b.title AS brand_title,
       s.id AS supplier_id, s.title AS supplier_title,
       u.id AS unit_id, u.title AS unit_title
FROM items i
LEFT JOIN categories c ON c.id = i."categoryId"
LEFT JOIN warehouses w ON w.id = i."warehouseId"
LEFT JOIN brands b ON b.id = i."brandId"
LEFT JOIN suppliers s ON s.id = i."supplierId"
LEFT JOIN units u ON u.id = i."unitId"
"#;

/// PostgreSQL-backed item source.
///
/// Wraps a shared connection pool; read-only from this subsystem's
/// perspective.
pub struct PgItemSource {
    pool: PgPool,
}

impl PgItemSource {
    /// Connect to the database and build a pooled source.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self, SyncError> {
        if dsn.trim().is_empty() {
            return Err(SyncError::source("database DSN must not be empty"));
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(dsn)
            .await?;

        debug!(max_connections, "Connected item source pool");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (shared with other subsystems).
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemSource for PgItemSource {
    async fn fetch_item(&self, item_id: &str) -> Result<Option<ItemRecord>, SyncError> {
        let sql = format!("{} WHERE i.id = $1", SELECT_ITEMS);

        let row = sqlx::query(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| map_item_row(&r)).transpose()
    }

    async fn fetch_by_relation(
        &self,
        field: RelationField,
        relation_id: &str,
    ) -> Result<Vec<ItemRecord>, SyncError> {
        // The column comes from a closed enum, never from caller input.
        let sql = format!("{} WHERE i.\"{}\" = $1", SELECT_ITEMS, field.column());

        let rows = sqlx::query(&sql)
            .bind(relation_id)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_item_row).collect()
    }

    async fn fetch_all(&self) -> Result<Vec<ItemRecord>, SyncError> {
        let rows = sqlx::query(SELECT_ITEMS).fetch_all(&self.pool).await?;

        rows.iter().map(map_item_row).collect()
    }
}

/// Map one joined row to an item record.
fn map_item_row(row: &PgRow) -> Result<ItemRecord, SyncError> {
    Ok(ItemRecord {
        id: row.try_get("id")?,
        sku: row.try_get("sku")?,
        barcode: row.try_get("barcode")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        quantity: row.try_get::<i32, _>("quantity")? as i64,
        selling_price: row.try_get("sellingPrice")?,
        reorder_point: row.try_get::<i32, _>("reOrderPoint")? as i64,
        weight: row.try_get("weight")?,
        tax_rate: row.try_get("taxRate")?,
        image_url: row.try_get("imageUrl")?,
        category: map_lookup(row, "category_id", "category_title")?,
        warehouse: map_lookup(row, "warehouse_id", "warehouse_title")?,
        brand: map_lookup(row, "brand_id", "brand_title")?,
        supplier: map_lookup(row, "supplier_id", "supplier_title")?,
        unit: map_lookup(row, "unit_id", "unit_title")?,
        created_at: row.try_get::<DateTime<Utc>, _>("createdAt")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updatedAt")?,
    })
}

/// Map an optional joined lookup pair; both columns are null when the
/// foreign key is unset.
fn map_lookup(row: &PgRow, id_col: &str, title_col: &str) -> Result<Option<LookupRef>, SyncError> {
    let id: Option<String> = row.try_get(id_col)?;
    let title: Option<String> = row.try_get(title_col)?;

    Ok(match (id, title) {
        (Some(id), Some(title)) => Some(LookupRef { id, title }),
        _ => None,
    })
}
