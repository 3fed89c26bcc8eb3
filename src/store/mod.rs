//! Record Stores
//!
//! Capability interfaces for the two storage layers a reindexing pass talks to:
//! the preservation layer (source of truth for parent edges) and the index layer
//! (derived membership records). Pass logic depends only on these traits.

pub mod memory;
pub mod persistence;

use crate::error::StorageError;
use crate::types::Id;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// PreservationRecord: an object and the parents it declares membership in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreservationRecord {
    pub id: Id,
    pub parent_ids: BTreeSet<Id>,
}

impl PreservationRecord {
    pub fn new<I, S>(id: impl Into<Id>, parent_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Id>,
    {
        Self {
            id: id.into(),
            parent_ids: parent_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// A record with no declared parents
    pub fn orphan(id: impl Into<Id>) -> Self {
        Self {
            id: id.into(),
            parent_ids: BTreeSet::new(),
        }
    }
}

/// IndexRecord: the derived membership closure of one object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRecord {
    pub id: Id,
    /// Immediate parents as recorded by the pass that wrote this record
    pub parent_ids: BTreeSet<Id>,
    /// Every materialized path from a root-reachable ancestor down to `id`
    pub pathnames: BTreeSet<String>,
    /// Every strict prefix of every pathname
    pub ancestors: BTreeSet<String>,
}

impl IndexRecord {
    pub fn is_orphan(&self) -> bool {
        self.parent_ids.is_empty()
    }
}

/// Preservation-side port: read-only access to declared parents
pub trait PreservationStore: Send + Sync {
    fn find_preservation_record(&self, id: &str) -> Result<PreservationRecord, StorageError>;
}

/// Index-side port: read/write access to derived records
pub trait IndexStore: Send + Sync {
    fn find_index_record(&self, id: &str) -> Result<IndexRecord, StorageError>;
    /// Upsert keyed by `record.id`. Visible to subsequent reads.
    fn write_index_record(&self, record: IndexRecord) -> Result<(), StorageError>;
    /// Every indexed record whose `parent_ids` contains `id`
    fn find_children(&self, id: &str) -> Result<Vec<IndexRecord>, StorageError>;
    fn clear_all(&self) -> Result<(), StorageError>;
}
