//! # Inventory Indexer Shared
//!
//! Shared data structures for the inventory search indexer system:
//! the index document shape, the relational record shape it is projected
//! from, the search filter set, and the response/facet types.

pub mod document;
pub mod filters;
pub mod response;

pub use document::{ItemDocument, ItemRecord, LookupRef};
pub use filters::{SearchFilters, SearchPage, DEFAULT_PAGE_SIZE};
pub use response::{FacetSummary, PriceRange, SearchHit, SearchResponse};
