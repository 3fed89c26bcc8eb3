//! Indexer facade
//!
//! Owns a preservation store and an index store and runs passes against them
//! with the configured ceiling and cycle guard. Failures come back wrapped in
//! [`IndexerError::Reindexing`] carrying the id whose reindex was requested.

use crate::config::ReindexConfig;
use crate::error::IndexerError;
use crate::reindex::{ReindexMode, ReindexReport, Reindexer};
use crate::store::{IndexRecord, IndexStore, PreservationRecord, PreservationStore};
use tracing::error;

pub struct NestingIndexer<P, I> {
    preservation: P,
    index: I,
    config: ReindexConfig,
}

impl<P, I> NestingIndexer<P, I>
where
    P: PreservationStore,
    I: IndexStore,
{
    pub fn new(preservation: P, index: I, config: ReindexConfig) -> Self {
        Self {
            preservation,
            index,
            config,
        }
    }

    pub fn config(&self) -> &ReindexConfig {
        &self.config
    }

    pub fn preservation(&self) -> &P {
        &self.preservation
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    /// Rebuild `id` and everything below it
    pub fn reindex_relationships(&self, id: &str) -> Result<ReindexReport, IndexerError> {
        self.reindex(id, ReindexMode::Full)
    }

    /// Rebuild everything below `id`, trusting its own record
    pub fn reindex_descendants(&self, id: &str) -> Result<ReindexReport, IndexerError> {
        self.reindex(id, ReindexMode::DescendantsOnly)
    }

    pub fn reindex(&self, id: &str, mode: ReindexMode) -> Result<ReindexReport, IndexerError> {
        self.reindexer().reindex(id, mode).map_err(|err| {
            error!(id, %mode, error = %err, "Reindex pass failed");
            IndexerError::reindexing(id, err)
        })
    }

    pub fn find_index_record(&self, id: &str) -> Result<IndexRecord, IndexerError> {
        Ok(self.index.find_index_record(id)?)
    }

    pub fn find_preservation_record(&self, id: &str) -> Result<PreservationRecord, IndexerError> {
        Ok(self.preservation.find_preservation_record(id)?)
    }

    pub fn children_of(&self, id: &str) -> Result<Vec<IndexRecord>, IndexerError> {
        Ok(self.index.find_children(id)?)
    }

    pub fn clear_index(&self) -> Result<(), IndexerError> {
        Ok(self.index.clear_all()?)
    }

    fn reindexer(&self) -> Reindexer<'_> {
        Reindexer::new(&self.preservation, &self.index)
            .with_hop_ceiling(self.config.hop_ceiling)
            .with_cycle_guard(self.config.cycle_guard())
    }
}
