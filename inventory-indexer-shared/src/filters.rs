//! Search filter set and pagination.

use serde::{Deserialize, Serialize};

/// Default number of hits per page when the caller does not override it.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sparse set of optional search constraints.
///
/// Absent fields impose no constraint. All present filters combine with
/// logical AND against each other and against the free-text term. A price
/// range with `min > max` is kept as-is: it matches nothing, which is the
/// caller's mistake to observe, not a system failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Exact category id.
    pub category_id: Option<String>,
    /// Exact warehouse id.
    pub warehouse_id: Option<String>,
    /// Exact brand id.
    pub brand_id: Option<String>,
    /// Lower selling-price bound (inclusive).
    pub min_price: Option<f64>,
    /// Upper selling-price bound (inclusive).
    pub max_price: Option<f64>,
    /// Only items with quantity > 0.
    pub in_stock: bool,
    /// Only items with quantity <= reorder point.
    pub low_stock: bool,
}

impl SearchFilters {
    /// True when no constraint is set.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.warehouse_id.is_none()
            && self.brand_id.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && !self.in_stock
            && !self.low_stock
    }
}

/// Offset-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPage {
    /// Offset of the first hit to return.
    pub from: usize,
    /// Number of hits to return.
    pub size: usize,
}

impl Default for SearchPage {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchPage {
    /// First page with a custom size.
    pub fn with_size(size: usize) -> Self {
        Self { from: 0, size }
    }
}
