//! Error types for the nesting index.

use crate::types::Id;
use std::fmt;

/// Which side of the system a storage lookup went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Preservation,
    Index,
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKind::Preservation => write!(f, "Preservation"),
            StoreKind::Index => write!(f, "Index"),
        }
    }
}

/// Errors raised by store adapters
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{store} record not found: {id}")]
    NotFound { store: StoreKind, id: Id },

    #[error("Storage backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn not_found(store: StoreKind, id: &str) -> Self {
        StorageError::NotFound {
            store,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

/// Errors raised by reindexing passes and the surrounding tooling
#[derive(Debug, thiserror::Error)]
pub enum IndexerError {
    /// A work item exhausted its hop budget. Carries the id the pass started from.
    #[error("Possible graph cycle discovered related to id={0}")]
    CycleDetected(Id),

    /// Strict mode only: an id was reached again through its own descendants.
    #[error("Graph cycle confirmed at id={id} via {}", .trail.join(" -> "))]
    CycleConfirmed { id: Id, trail: Vec<Id> },

    #[error("{store} record not found: {id}")]
    NotFound { store: StoreKind, id: Id },

    #[error("Parent {parent_id} of {id} has no index record")]
    MissingParentIndex { id: Id, parent_id: Id },

    #[error("Error id={id} - {source}")]
    Reindexing {
        id: Id,
        #[source]
        source: Box<IndexerError>,
    },

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IndexerError {
    /// Wrap `source` so the id being reindexed survives for diagnostics
    pub fn reindexing(id: &str, source: IndexerError) -> Self {
        IndexerError::Reindexing {
            id: id.to_string(),
            source: Box::new(source),
        }
    }

    /// The innermost error beneath any `Reindexing` wrappers
    pub fn root_cause(&self) -> &IndexerError {
        match self {
            IndexerError::Reindexing { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(
            self.root_cause(),
            IndexerError::CycleDetected(_) | IndexerError::CycleConfirmed { .. }
        )
    }
}

impl From<StorageError> for IndexerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { store, id } => IndexerError::NotFound { store, id },
            other => IndexerError::Storage(other),
        }
    }
}

impl From<config::ConfigError> for IndexerError {
    fn from(err: config::ConfigError) -> Self {
        IndexerError::ConfigError(err.to_string())
    }
}
