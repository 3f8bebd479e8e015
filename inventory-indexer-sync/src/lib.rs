//! # Inventory Indexer Sync
//!
//! Synchronization between the relational inventory store and the search
//! index:
//!
//! 1. **Source**: read-only access to inventory records with relations
//!    resolved
//! 2. **Projector**: pure mapping from a record to an index document
//! 3. **Syncer**: incremental operations (upsert, delete, cascade reindex)
//! 4. **Loader**: full-corpus bulk rebuild
//!
//! The index is never authoritative: incremental sync failures leave it
//! stale rather than failing the relational write that triggered them, and
//! a rebuild restores consistency.

pub mod errors;
pub mod loader;
pub mod projector;
pub mod source;
pub mod syncer;

pub use errors::SyncError;
pub use loader::{BulkLoader, RebuildSummary};
pub use projector::project;
pub use source::{ItemSource, PgItemSource, RelationField};
pub use syncer::{ItemSyncer, SyncOutcome};
