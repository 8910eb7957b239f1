//! Bounded, injectable activity log.
//!
//! The admin console keeps its audit trail client-side of the record store:
//! a capped, newest-first list that is independent of server records. It is
//! modeled here as an explicit store passed into the ledger service rather
//! than ambient global state.

use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use stockroom_ledger::ActivityEntry;

/// Maximum number of retained entries; oldest are dropped first.
pub const DEFAULT_ACTIVITY_CAPACITY: usize = 200;

/// Append-only sink for activity entries.
///
/// Appends happen only after a successful store call, so implementations
/// never see entries for failed or rejected operations.
pub trait ActivityLog: Send + Sync {
    fn append(&self, entry: ActivityEntry);

    /// Retained entries, newest first.
    fn recent(&self) -> Vec<ActivityEntry>;
}

impl<L> ActivityLog for Arc<L>
where
    L: ActivityLog + ?Sized,
{
    fn append(&self, entry: ActivityEntry) {
        (**self).append(entry)
    }

    fn recent(&self) -> Vec<ActivityEntry> {
        (**self).recent()
    }
}

/// Capped in-memory activity log (ring-buffer semantics).
#[derive(Debug)]
pub struct BoundedActivityLog {
    capacity: usize,
    entries: RwLock<VecDeque<ActivityEntry>>,
}

impl BoundedActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BoundedActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVITY_CAPACITY)
    }
}

impl ActivityLog for BoundedActivityLog {
    fn append(&self, entry: ActivityEntry) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push_front(entry);
            entries.truncate(self.capacity);
        }
    }

    fn recent(&self) -> Vec<ActivityEntry> {
        match self.entries.read() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(_) => vec![],
        }
    }
}
