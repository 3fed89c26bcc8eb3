//! In-memory store adapters
//!
//! Caller-owned maps guarded by `parking_lot` locks. Useful for tests and for
//! hosting applications that keep the index in process.

use crate::error::{StorageError, StoreKind};
use crate::store::{IndexRecord, IndexStore, PreservationRecord, PreservationStore};
use crate::types::Id;
use parking_lot::RwLock;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Preservation records keyed by id
#[derive(Default)]
pub struct MemoryPreservationStore {
    records: RwLock<HashMap<Id, PreservationRecord>>,
}

impl MemoryPreservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the record for `record.id`
    pub fn insert(&self, record: PreservationRecord) {
        self.records.write().insert(record.id.clone(), record);
    }

    /// Declare additional parents for `id`, creating an orphan record first if needed
    pub fn add_parents<I, S>(&self, id: &str, parent_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<Id>,
    {
        let mut records = self.records.write();
        let record = records
            .entry(id.to_string())
            .or_insert_with(|| PreservationRecord::orphan(id));
        record
            .parent_ids
            .extend(parent_ids.into_iter().map(Into::into));
    }

    pub fn remove(&self, id: &str) -> Option<PreservationRecord> {
        self.records.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PreservationStore for MemoryPreservationStore {
    fn find_preservation_record(&self, id: &str) -> Result<PreservationRecord, StorageError> {
        self.records
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(StoreKind::Preservation, id))
    }
}

#[derive(Default)]
struct IndexState {
    records: HashMap<Id, IndexRecord>,
    /// Reverse index: parent id -> ids whose record lists it
    children: HashMap<Id, BTreeSet<Id>>,
}

/// Index records keyed by id, with a reverse parent -> children map
#[derive(Default)]
pub struct MemoryIndexStore {
    state: RwLock<IndexState>,
}

impl MemoryIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().records.is_empty()
    }

    /// Copy of every record, ordered by id
    pub fn snapshot(&self) -> BTreeMap<Id, IndexRecord> {
        self.state
            .read()
            .records
            .iter()
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect()
    }
}

impl IndexStore for MemoryIndexStore {
    fn find_index_record(&self, id: &str) -> Result<IndexRecord, StorageError> {
        self.state
            .read()
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| StorageError::not_found(StoreKind::Index, id))
    }

    fn write_index_record(&self, record: IndexRecord) -> Result<(), StorageError> {
        let mut state = self.state.write();
        let IndexState { records, children } = &mut *state;

        if let Some(previous) = records.get(&record.id) {
            for parent_id in previous.parent_ids.difference(&record.parent_ids) {
                if let Some(siblings) = children.get_mut(parent_id) {
                    siblings.remove(&record.id);
                    if siblings.is_empty() {
                        children.remove(parent_id);
                    }
                }
            }
        }
        for parent_id in &record.parent_ids {
            children
                .entry(parent_id.clone())
                .or_default()
                .insert(record.id.clone());
        }
        records.insert(record.id.clone(), record);
        Ok(())
    }

    fn find_children(&self, id: &str) -> Result<Vec<IndexRecord>, StorageError> {
        let state = self.state.read();
        let Some(child_ids) = state.children.get(id) else {
            return Ok(Vec::new());
        };
        Ok(child_ids
            .iter()
            .filter_map(|child_id| state.records.get(child_id).cloned())
            .collect())
    }

    fn clear_all(&self) -> Result<(), StorageError> {
        let mut state = self.state.write();
        state.records.clear();
        state.children.clear();
        Ok(())
    }
}
