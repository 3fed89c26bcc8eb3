//! Sled-backed store adapter
//!
//! One database holds three trees:
//! - `preservation`: id -> bincode(PreservationRecord)
//! - `index`: id -> bincode(IndexRecord)
//! - `children`: `len(parent) parent child` -> empty, kept in step with `index`
//!
//! Edge keys lead with the parent's byte length as a big-endian `u32`, so any
//! id bytes (NUL included) map to exactly one edge.

use crate::error::{StorageError, StoreKind};
use crate::store::{IndexRecord, IndexStore, PreservationRecord, PreservationStore};
use sled::transaction::{
    ConflictableTransactionError, ConflictableTransactionResult, TransactionError,
};
use sled::Transactional;
use std::path::Path;
use tracing::debug;

const PRESERVATION_TREE: &str = "preservation";
const INDEX_TREE: &str = "index";
const CHILDREN_TREE: &str = "children";

/// Persistent store implementing both ports. Clones share the same database.
#[derive(Clone)]
pub struct SledStore {
    db: sled::Db,
    preservation: sled::Tree,
    index: sled::Tree,
    children: sled::Tree,
}

impl SledStore {
    /// Open (or create) a store at `path`
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        debug!(path = %path.display(), "Opening sled store");
        Self::from_db(sled::open(path)?)
    }

    /// A throwaway store removed when dropped
    pub fn temporary() -> Result<Self, StorageError> {
        Self::from_db(sled::Config::new().temporary(true).open()?)
    }

    fn from_db(db: sled::Db) -> Result<Self, StorageError> {
        Ok(Self {
            preservation: db.open_tree(PRESERVATION_TREE)?,
            index: db.open_tree(INDEX_TREE)?,
            children: db.open_tree(CHILDREN_TREE)?,
            db,
        })
    }

    /// Insert or replace a preservation record (administrative seeding)
    pub fn put_preservation_record(&self, record: &PreservationRecord) -> Result<(), StorageError> {
        let bytes = bincode::serialize(record)?;
        self.preservation.insert(record.id.as_bytes(), bytes)?;
        Ok(())
    }

    pub fn flush(&self) -> Result<(), StorageError> {
        self.db.flush()?;
        Ok(())
    }

    fn edge_prefix(parent_id: &str) -> Result<Vec<u8>, StorageError> {
        let len = u32::try_from(parent_id.len()).map_err(|_| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("id too long for an edge key ({} bytes)", parent_id.len()),
            ))
        })?;
        let mut key = Vec::with_capacity(4 + parent_id.len());
        key.extend_from_slice(&len.to_be_bytes());
        key.extend_from_slice(parent_id.as_bytes());
        Ok(key)
    }

    fn edge_key(parent_id: &str, child_id: &str) -> Result<Vec<u8>, StorageError> {
        let mut key = Self::edge_prefix(parent_id)?;
        key.extend_from_slice(child_id.as_bytes());
        Ok(key)
    }
}

impl PreservationStore for SledStore {
    fn find_preservation_record(&self, id: &str) -> Result<PreservationRecord, StorageError> {
        match self.preservation.get(id.as_bytes())? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(StorageError::not_found(StoreKind::Preservation, id)),
        }
    }
}

impl IndexStore for SledStore {
    fn find_index_record(&self, id: &str) -> Result<IndexRecord, StorageError> {
        match self.index.get(id.as_bytes())? {
            Some(bytes) => Ok(bincode::deserialize(&bytes)?),
            None => Err(StorageError::not_found(StoreKind::Index, id)),
        }
    }

    fn write_index_record(&self, record: IndexRecord) -> Result<(), StorageError> {
        let bytes = bincode::serialize(&record)?;
        let edges = record
            .parent_ids
            .iter()
            .map(|parent_id| Self::edge_key(parent_id, &record.id))
            .collect::<Result<Vec<_>, StorageError>>()?;

        // Edges and record move together; sled retries the closure on conflict.
        (&self.index, &self.children)
            .transaction(|(index, children)| -> ConflictableTransactionResult<(), StorageError> {
                if let Some(previous) = index.get(record.id.as_bytes())? {
                    let previous: IndexRecord = bincode::deserialize(&previous)
                        .map_err(|err| ConflictableTransactionError::Abort(StorageError::from(err)))?;
                    for parent_id in previous.parent_ids.difference(&record.parent_ids) {
                        let key = Self::edge_key(parent_id, &record.id)
                            .map_err(ConflictableTransactionError::Abort)?;
                        children.remove(key)?;
                    }
                }
                for key in &edges {
                    children.insert(key.as_slice(), Vec::<u8>::new())?;
                }
                index.insert(record.id.as_bytes(), bytes.as_slice())?;
                Ok(())
            })
            .map_err(|err| match err {
                TransactionError::Abort(err) => err,
                TransactionError::Storage(err) => StorageError::Backend(err),
            })
    }

    fn find_children(&self, id: &str) -> Result<Vec<IndexRecord>, StorageError> {
        let prefix = Self::edge_prefix(id)?;
        let mut records = Vec::new();
        for entry in self.children.scan_prefix(&prefix) {
            let (key, _) = entry?;
            let child_id = &key[prefix.len()..];
            if let Some(bytes) = self.index.get(child_id)? {
                let record: IndexRecord = bincode::deserialize(&bytes)?;
                if record.parent_ids.contains(id) {
                    records.push(record);
                }
            }
        }
        Ok(records)
    }

    fn clear_all(&self) -> Result<(), StorageError> {
        self.index.clear()?;
        self.children.clear()?;
        Ok(())
    }
}
