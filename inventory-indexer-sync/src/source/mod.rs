//! Read-only access to the relational record source.
//!
//! This subsystem never writes to the relational store; it only reads
//! items with their lookup relations resolved.

mod postgres;

use async_trait::async_trait;

use crate::errors::SyncError;
use inventory_indexer_shared::ItemRecord;

pub use postgres::PgItemSource;

/// The lookup relations an item can reference.
///
/// A closed enum rather than a raw column name: callers cannot inject
/// arbitrary identifiers into SQL through the cascade-reindex path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationField {
    CategoryId,
    WarehouseId,
    BrandId,
    SupplierId,
    UnitId,
}

impl RelationField {
    /// The foreign-key column on the items table.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CategoryId => "categoryId",
            Self::WarehouseId => "warehouseId",
            Self::BrandId => "brandId",
            Self::SupplierId => "supplierId",
            Self::UnitId => "unitId",
        }
    }
}

impl std::fmt::Display for RelationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

/// Abstract record source for inventory items.
///
/// Implementations resolve every lookup relation before returning a
/// record, so downstream projection is a pure function.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Fetch one item by id, or `None` when it no longer exists.
    async fn fetch_item(&self, item_id: &str) -> Result<Option<ItemRecord>, SyncError>;

    /// Fetch every item referencing `relation_id` through `field`.
    async fn fetch_by_relation(
        &self,
        field: RelationField,
        relation_id: &str,
    ) -> Result<Vec<ItemRecord>, SyncError>;

    /// Fetch the entire corpus with relations resolved.
    ///
    /// Unbounded: assumes the corpus fits in memory. A known scale limit
    /// of the full-rebuild path.
    async fn fetch_all(&self) -> Result<Vec<ItemRecord>, SyncError>;
}
