//! OpenSearch backend for the search index provider.

pub mod client;
pub mod index_config;
pub mod queries;
pub mod response;

pub use client::OpenSearchClient;
pub use index_config::{get_index_settings, ITEMS_INDEX};
