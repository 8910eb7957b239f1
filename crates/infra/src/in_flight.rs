//! Per-record mutual exclusion for mutating operations.
//!
//! The console serializes user actions one record at a time: while an
//! issue/return request for a row is outstanding, a second request for the
//! same row must fail fast instead of racing it. Operations on different
//! records are independent.

use std::collections::HashSet;
use std::sync::Mutex;

use stockroom_core::{LedgerError, LedgerResult, RecordId};

/// Set of record ids with a mutating operation currently in flight.
#[derive(Debug, Default)]
pub struct InFlightRegistry {
    inner: Mutex<HashSet<RecordId>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as busy, failing with [`LedgerError::Busy`] if it already is.
    ///
    /// The returned guard releases the record on drop, including on error
    /// paths and panics.
    pub fn try_begin(&self, id: RecordId) -> LedgerResult<InFlightGuard<'_>> {
        let mut busy = self
            .inner
            .lock()
            .map_err(|_| LedgerError::busy("in-flight registry lock poisoned"))?;

        if !busy.insert(id) {
            return Err(LedgerError::busy(format!("record {id}")));
        }

        Ok(InFlightGuard { registry: self, id })
    }
}

/// RAII marker for one in-flight operation.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    registry: &'a InFlightRegistry,
    id: RecordId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut busy) = self.registry.inner.lock() {
            busy.remove(&self.id);
        }
    }
}
