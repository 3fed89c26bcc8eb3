//! Reindex work queue
//!
//! FIFO queue of work items. Each item carries a remaining-hops budget that
//! shrinks by one per generation; an item dequeued with no budget left means the
//! pass has walked farther than the ceiling allows.

use crate::types::Id;
use std::collections::VecDeque;

/// One pending visit in a reindexing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub id: Id,
    pub remaining_hops: u32,
    /// Ids that led to this item within the pass. Only tracked under strict cycle detection.
    trail: Option<Vec<Id>>,
}

impl WorkItem {
    /// A seed item. `trail` starts empty when strict cycle detection is on.
    pub fn seed(id: impl Into<Id>, remaining_hops: u32, track_trail: bool) -> Self {
        Self {
            id: id.into(),
            remaining_hops,
            trail: track_trail.then(Vec::new),
        }
    }

    /// A seed item already reached through `trail`
    pub fn seed_under(id: impl Into<Id>, remaining_hops: u32, trail: Option<Vec<Id>>) -> Self {
        Self {
            id: id.into(),
            remaining_hops,
            trail,
        }
    }

    /// The item for `child_id`, one hop further from the seed
    pub fn child(&self, child_id: impl Into<Id>) -> Self {
        Self {
            id: child_id.into(),
            remaining_hops: self.remaining_hops.saturating_sub(1),
            trail: self.trail.as_ref().map(|trail| {
                let mut trail = trail.clone();
                trail.push(self.id.clone());
                trail
            }),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining_hops == 0
    }

    /// The trail closed into a loop, if this item's id already appears on it
    pub fn revisited_trail(&self) -> Option<Vec<Id>> {
        let trail = self.trail.as_ref()?;
        let start = trail.iter().position(|id| *id == self.id)?;
        let mut cycle = trail[start..].to_vec();
        cycle.push(self.id.clone());
        Some(cycle)
    }
}

/// FIFO queue of work items
#[derive(Debug, Default)]
pub struct WorkQueue {
    items: VecDeque<WorkItem>,
    enqueued: usize,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, item: WorkItem) {
        self.enqueued += 1;
        self.items.push_back(item);
    }

    pub fn dequeue(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items enqueued over the life of the queue
    pub fn total_enqueued(&self) -> usize {
        self.enqueued
    }
}
