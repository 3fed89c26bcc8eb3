//! Cycle-Bounded Reindexing
//!
//! Breadth-first walk from a changed object out to its descendants. Every
//! visited object gets a freshly built index record, written before any of its
//! children are dequeued, so each child is built from up-to-date parents.
//!
//! The only loop breaker is the hop budget carried by each work item. A graph
//! nested deeper than the ceiling fails the same way a cyclic graph does.

pub mod queue;

use crate::closure::build_from_index;
use crate::error::IndexerError;
use crate::store::{IndexStore, PreservationStore};
use crate::types::{Id, DEFAULT_HOP_CEILING};
use queue::{WorkItem, WorkQueue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Where a pass starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReindexMode {
    /// Rebuild the start object, then everything below it
    Full,
    /// Leave the start object alone; rebuild its children and everything below them
    DescendantsOnly,
}

impl fmt::Display for ReindexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReindexMode::Full => write!(f, "full"),
            ReindexMode::DescendantsOnly => write!(f, "descendants_only"),
        }
    }
}

/// How a pass guards against walking a cyclic graph forever
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleGuard {
    /// Fail once an item runs out of hops
    #[default]
    HopBudget,
    /// Also fail as soon as an id is reached again through its own descendants
    Strict,
}

/// Summary of a completed pass
#[derive(Debug, Clone)]
pub struct ReindexReport {
    pub start_id: Id,
    pub mode: ReindexMode,
    /// Ids in the order their records were written. Fan-in nodes appear once per visit.
    pub written: Vec<Id>,
    /// Work items created during the pass
    pub enqueued: usize,
    pub duration_ms: u64,
}

impl ReindexReport {
    pub fn written_count(&self) -> usize {
        self.written.len()
    }
}

/// Drives one or more passes over a pair of stores
pub struct Reindexer<'a> {
    preservation: &'a dyn PreservationStore,
    index: &'a dyn IndexStore,
    hop_ceiling: u32,
    guard: CycleGuard,
}

impl<'a> Reindexer<'a> {
    pub fn new(preservation: &'a dyn PreservationStore, index: &'a dyn IndexStore) -> Self {
        Self {
            preservation,
            index,
            hop_ceiling: DEFAULT_HOP_CEILING,
            guard: CycleGuard::default(),
        }
    }

    pub fn with_hop_ceiling(mut self, hop_ceiling: u32) -> Self {
        self.hop_ceiling = hop_ceiling;
        self
    }

    pub fn with_cycle_guard(mut self, guard: CycleGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn hop_ceiling(&self) -> u32 {
        self.hop_ceiling
    }

    /// Run one pass from `start_id`.
    ///
    /// Any failure aborts the pass. Records written before the failure stay written.
    pub fn reindex(&self, start_id: &str, mode: ReindexMode) -> Result<ReindexReport, IndexerError> {
        let started = Instant::now();
        let mut queue = self.seed(start_id, mode)?;
        info!(
            start_id,
            %mode,
            hop_ceiling = self.hop_ceiling,
            seeded = queue.len(),
            "Reindex pass seeded"
        );

        let mut written = Vec::new();
        while let Some(item) = queue.dequeue() {
            if item.is_exhausted() {
                warn!(
                    start_id,
                    id = %item.id,
                    hop_ceiling = self.hop_ceiling,
                    "Hop budget exhausted"
                );
                return Err(IndexerError::CycleDetected(start_id.to_string()));
            }
            if let Some(trail) = item.revisited_trail() {
                warn!(start_id, id = %item.id, "Id reached through its own descendants");
                return Err(IndexerError::CycleConfirmed {
                    id: item.id,
                    trail,
                });
            }

            self.process(&item)?;
            written.push(item.id.clone());

            for child in self.index.find_children(&item.id)? {
                queue.enqueue(item.child(child.id));
            }
        }

        let report = ReindexReport {
            start_id: start_id.to_string(),
            mode,
            written,
            enqueued: queue.total_enqueued(),
            duration_ms: started.elapsed().as_millis() as u64,
        };
        info!(
            start_id,
            %mode,
            written = report.written_count(),
            enqueued = report.enqueued,
            duration_ms = report.duration_ms,
            "Reindex pass completed"
        );
        Ok(report)
    }

    fn seed(&self, start_id: &str, mode: ReindexMode) -> Result<WorkQueue, IndexerError> {
        let track_trail = self.guard == CycleGuard::Strict;
        let mut queue = WorkQueue::new();
        match mode {
            ReindexMode::Full => {
                queue.enqueue(WorkItem::seed(start_id, self.hop_ceiling, track_trail));
            }
            ReindexMode::DescendantsOnly => {
                let trail = track_trail.then(|| vec![start_id.to_string()]);
                for child in self.index.find_children(start_id)? {
                    queue.enqueue(WorkItem::seed_under(
                        child.id,
                        self.hop_ceiling,
                        trail.clone(),
                    ));
                }
            }
        }
        Ok(queue)
    }

    fn process(&self, item: &WorkItem) -> Result<(), IndexerError> {
        let preservation_record = self.preservation.find_preservation_record(&item.id)?;
        let record = build_from_index(&preservation_record, self.index)?;
        debug!(
            id = %record.id,
            remaining_hops = item.remaining_hops,
            parents = record.parent_ids.len(),
            pathnames = record.pathnames.len(),
            ancestors = record.ancestors.len(),
            "Writing index record"
        );
        self.index.write_index_record(record)?;
        Ok(())
    }
}
