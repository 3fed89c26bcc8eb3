//! Nesting Index: transitive membership for repository objects
//!
//! Maintains a derived index of parent/child membership. Each object's index
//! record holds its immediate parents, every materialized path down to it, and
//! every ancestor path-prefix, so "what contains this, and by which paths"
//! needs no graph walk at query time. Records are rebuilt by a breadth-first
//! pass from a changed object outward to its descendants.

pub mod closure;
pub mod config;
pub mod error;
pub mod indexer;
pub mod logging;
pub mod reindex;
pub mod store;
pub mod tooling;
pub mod types;

pub use error::{IndexerError, StorageError};
pub use indexer::NestingIndexer;
pub use reindex::{CycleGuard, ReindexMode, ReindexReport, Reindexer};
pub use store::{IndexRecord, IndexStore, PreservationRecord, PreservationStore};
