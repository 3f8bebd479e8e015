//! # Inventory Indexer Repository
//!
//! This crate provides the trait and implementation for interacting with
//! the search index. It includes error definitions, the abstract
//! `SearchIndexProvider` interface, and a concrete OpenSearch backend.

pub mod client;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use client::SearchIndexClient;
pub use errors::SearchError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchClient;
pub use types::BulkIndexSummary;
