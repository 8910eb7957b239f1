//! Ledger workflow orchestration.
//!
//! `LedgerService` executes the four mutating workflows against the record
//! store and the activity log, in a fixed order:
//!
//! ```text
//! Request
//!   ↓
//! 1. Acquire the per-record in-flight slot (mutating ops only)
//!   ↓
//! 2. Validate (pure domain rules, before any store call)
//!   ↓
//! 3. Persist through the record store (single call)
//!   ↓
//! 4. Append one activity entry (only after the store call succeeded)
//! ```
//!
//! Validation failures never reach the store; store failures never reach the
//! log. The caller always gets either success-with-new-state or
//! failure-with-unchanged-state.

use chrono::{DateTime, Utc};

use stockroom_core::{LedgerError, LedgerResult, RecordId};
use stockroom_ledger::{
    summarize, ActivityAction, ActivityEntry, AddStockDetail, InventoryRecord, IssueDetail,
    NewRecord, RemovalDetail, StockSummary,
};

use crate::activity_log::ActivityLog;
use crate::in_flight::InFlightRegistry;
use crate::record_store::{RecordPatch, RecordStore, StoreError};

/// Result of a successful issue operation.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueOutcome {
    pub record: InventoryRecord,
    pub entry: ActivityEntry,
}

/// Result of a successful return/delete operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalOutcome {
    pub record_id: RecordId,
    pub removed_qty: i64,
    pub entry: ActivityEntry,
}

/// The inventory ledger engine.
///
/// Generic over the store and log so tests can inject in-memory or failing
/// implementations; the API layer injects the shared instances.
#[derive(Debug)]
pub struct LedgerService<S, L> {
    store: S,
    log: L,
    in_flight: InFlightRegistry,
}

impl<S, L> LedgerService<S, L>
where
    S: RecordStore,
    L: ActivityLog,
{
    pub fn new(store: S, log: L) -> Self {
        Self {
            store,
            log,
            in_flight: InFlightRegistry::new(),
        }
    }

    /// All records in the store.
    ///
    /// Display read: a store failure degrades to an empty list (with a
    /// warning) instead of failing the caller.
    pub fn list_records(&self) -> Vec<InventoryRecord> {
        match self.store.list() {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "record list failed, degrading to empty");
                vec![]
            }
        }
    }

    pub fn get_record(&self, id: RecordId) -> LedgerResult<InventoryRecord> {
        self.load(id)
    }

    /// Issue stock: decrement a lot's quantity.
    ///
    /// Exactly one `ISSUE` entry is appended on success; no entry and no
    /// mutation on any failure.
    pub fn issue(&self, id: RecordId, requested: i64, now: DateTime<Utc>) -> LedgerResult<IssueOutcome> {
        let _slot = self.in_flight.try_begin(id)?;

        let record = self.load(id)?;
        let new_qty = record.validate_issue(requested, now)?;

        let updated = self
            .store
            .update(id, RecordPatch::with_quantity(new_qty))
            .map_err(map_store_err)?;

        let entry = ActivityEntry::new(
            id,
            record.name.clone(),
            now,
            ActivityAction::Issue(IssueDetail {
                qty: requested,
                prev_qty: record.quantity,
                new_qty,
            }),
        );
        self.log.append(entry.clone());

        tracing::info!(record = %record.display_code(), qty = requested, "stock issued");
        Ok(IssueOutcome {
            record: updated,
            entry,
        })
    }

    /// Return a lot: remove it from the store entirely.
    ///
    /// Not gated by status; out-of-stock and expired lots may be returned
    /// to clear shelf entries.
    pub fn return_stock(&self, id: RecordId, now: DateTime<Utc>) -> LedgerResult<RemovalOutcome> {
        self.remove_lot(id, now, Removal::Return)
    }

    /// Delete a lot: same mechanics as return, logged as `DELETE`.
    pub fn delete_record(&self, id: RecordId, now: DateTime<Utc>) -> LedgerResult<RemovalOutcome> {
        self.remove_lot(id, now, Removal::Delete)
    }

    /// Receive a new lot. Always creates a new record, never merges into an
    /// existing lot with the same name.
    pub fn add_stock(&self, input: NewRecord, now: DateTime<Utc>) -> LedgerResult<InventoryRecord> {
        input.validate()?;

        let created = self.store.create(input).map_err(map_store_err)?;

        let entry = ActivityEntry::new(
            created.id,
            created.name.clone(),
            now,
            ActivityAction::AddStock(AddStockDetail {
                qty: created.quantity,
                unit_cost: created.unit_cost,
                category: created.category.clone(),
                location: created.location.clone(),
            }),
        );
        self.log.append(entry);

        tracing::info!(record = %created.display_code(), qty = created.quantity, "stock received");
        Ok(created)
    }

    /// Summary statistics over the current records.
    ///
    /// Display read, so it shares [`LedgerService::list_records`]'s
    /// degradation: a store failure yields an all-zero summary.
    pub fn summary(&self, now: DateTime<Utc>) -> StockSummary {
        summarize(&self.list_records(), now)
    }

    /// The capped activity log, newest first.
    pub fn activity(&self) -> Vec<ActivityEntry> {
        self.log.recent()
    }

    fn remove_lot(&self, id: RecordId, now: DateTime<Utc>, kind: Removal) -> LedgerResult<RemovalOutcome> {
        let _slot = self.in_flight.try_begin(id)?;

        let record = self.load(id)?;
        self.store.remove(id).map_err(map_store_err)?;

        let detail = RemovalDetail {
            qty: record.quantity,
            removed: true,
        };
        let action = match kind {
            Removal::Return => ActivityAction::Return(detail),
            Removal::Delete => ActivityAction::Delete(detail),
        };
        let entry = ActivityEntry::new(id, record.name.clone(), now, action);
        self.log.append(entry.clone());

        tracing::info!(record = %record.display_code(), qty = record.quantity, "lot removed");
        Ok(RemovalOutcome {
            record_id: id,
            removed_qty: record.quantity,
            entry,
        })
    }

    fn load(&self, id: RecordId) -> LedgerResult<InventoryRecord> {
        self.store
            .get(id)
            .map_err(map_store_err)?
            .ok_or(LedgerError::NotFound)
    }
}

#[derive(Debug, Copy, Clone)]
enum Removal {
    Return,
    Delete,
}

fn map_store_err(e: StoreError) -> LedgerError {
    match e {
        StoreError::NotFound => LedgerError::NotFound,
        other => LedgerError::persistence(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;
    use std::sync::Arc;

    use crate::activity_log::BoundedActivityLog;
    use crate::record_store::InMemoryRecordStore;

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn new_lot(name: &str, quantity: i64) -> NewRecord {
        NewRecord {
            inventory_code: None,
            name: name.to_string(),
            category: "supplies".to_string(),
            description: String::new(),
            location: "main store".to_string(),
            quantity,
            unit_cost: Decimal::new(25, 1),
            purchase_date: None,
            expiry_date: None,
        }
    }

    fn setup() -> LedgerService<Arc<InMemoryRecordStore>, Arc<BoundedActivityLog>> {
        LedgerService::new(
            Arc::new(InMemoryRecordStore::new()),
            Arc::new(BoundedActivityLog::default()),
        )
    }

    /// Store stub whose mutations always fail while reads succeed.
    struct FailingStore {
        inner: InMemoryRecordStore,
    }

    impl RecordStore for FailingStore {
        fn list(&self) -> Result<Vec<InventoryRecord>, StoreError> {
            self.inner.list()
        }

        fn get(&self, id: RecordId) -> Result<Option<InventoryRecord>, StoreError> {
            self.inner.get(id)
        }

        fn create(&self, _fields: NewRecord) -> Result<InventoryRecord, StoreError> {
            Err(StoreError::Unavailable("create failed".to_string()))
        }

        fn update(&self, _id: RecordId, _patch: RecordPatch) -> Result<InventoryRecord, StoreError> {
            Err(StoreError::Unavailable("update failed".to_string()))
        }

        fn remove(&self, _id: RecordId) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("remove failed".to_string()))
        }
    }

    #[test]
    fn issue_decrements_and_logs_exactly_one_entry() {
        let service = setup();
        let record = service.add_stock(new_lot("Water", 10), test_now()).unwrap();

        let outcome = service.issue(record.id, 4, test_now()).unwrap();
        assert_eq!(outcome.record.quantity, 6);

        let activity = service.activity();
        assert_eq!(activity.len(), 2); // ADD_STOCK + ISSUE
        assert_eq!(activity[0].action.action_type(), "ISSUE");
        match &activity[0].action {
            ActivityAction::Issue(d) => {
                assert_eq!((d.qty, d.prev_qty, d.new_qty), (4, 10, 6));
            }
            other => panic!("expected ISSUE, got {}", other.action_type()),
        }
    }

    #[test]
    fn issue_validation_failures_leave_everything_unchanged() {
        let service = setup();
        let record = service.add_stock(new_lot("Water", 3), test_now()).unwrap();
        let before = service.activity().len();

        assert!(matches!(
            service.issue(record.id, 0, test_now()),
            Err(LedgerError::InvalidQuantity(_))
        ));
        assert!(matches!(
            service.issue(record.id, 5, test_now()),
            Err(LedgerError::ExceedsAvailable { .. })
        ));

        assert_eq!(service.get_record(record.id).unwrap().quantity, 3);
        assert_eq!(service.activity().len(), before);
    }

    #[test]
    fn issue_on_missing_record_is_not_found() {
        let service = setup();
        assert_eq!(
            service.issue(RecordId::new(), 1, test_now()),
            Err(LedgerError::NotFound)
        );
    }

    #[test]
    fn store_failure_during_issue_appends_no_entry() {
        let inner = InMemoryRecordStore::new();
        let seeded = inner.create(new_lot("Water", 10)).unwrap();
        let log = Arc::new(BoundedActivityLog::default());
        let service = LedgerService::new(FailingStore { inner }, log.clone());

        let err = service.issue(seeded.id, 2, test_now()).unwrap_err();
        assert!(matches!(err, LedgerError::Persistence(_)));
        assert!(log.recent().is_empty());
    }

    #[test]
    fn store_failure_during_add_stock_appends_no_entry() {
        let log = Arc::new(BoundedActivityLog::default());
        let service = LedgerService::new(
            FailingStore {
                inner: InMemoryRecordStore::new(),
            },
            log.clone(),
        );

        assert!(matches!(
            service.add_stock(new_lot("Water", 10), test_now()),
            Err(LedgerError::Persistence(_))
        ));
        assert!(log.recent().is_empty());
    }

    #[test]
    fn return_removes_the_whole_lot_and_logs_it() {
        let service = setup();
        let record = service.add_stock(new_lot("Rice", 7), test_now()).unwrap();

        let outcome = service.return_stock(record.id, test_now()).unwrap();
        assert_eq!(outcome.removed_qty, 7);
        assert_eq!(service.get_record(record.id), Err(LedgerError::NotFound));

        let activity = service.activity();
        assert_eq!(activity[0].action.action_type(), "RETURN");
        match &activity[0].action {
            ActivityAction::Return(d) => {
                assert_eq!(d.qty, 7);
                assert!(d.removed);
            }
            other => panic!("expected RETURN, got {}", other.action_type()),
        }
    }

    #[test]
    fn zero_quantity_lots_can_still_be_returned() {
        let service = setup();
        let record = service.add_stock(new_lot("Rice", 5), test_now()).unwrap();
        service.issue(record.id, 5, test_now()).unwrap();

        let outcome = service.return_stock(record.id, test_now()).unwrap();
        assert_eq!(outcome.removed_qty, 0);
    }

    #[test]
    fn delete_logs_a_delete_action() {
        let service = setup();
        let record = service.add_stock(new_lot("Rice", 2), test_now()).unwrap();

        service.delete_record(record.id, test_now()).unwrap();
        assert_eq!(service.activity()[0].action.action_type(), "DELETE");
    }

    #[test]
    fn add_stock_validation_failures_never_reach_the_store() {
        let service = setup();
        let mut bad = new_lot("", 10);
        bad.name = "  ".to_string();

        assert!(matches!(
            service.add_stock(bad, test_now()),
            Err(LedgerError::Validation(_))
        ));
        assert!(service.list_records().is_empty());
        assert!(service.activity().is_empty());
    }

    #[test]
    fn in_flight_slot_is_released_after_each_operation() {
        let service = setup();
        let record = service.add_stock(new_lot("Water", 10), test_now()).unwrap();

        service.issue(record.id, 1, test_now()).unwrap();
        service.issue(record.id, 1, test_now()).unwrap();
        assert_eq!(service.get_record(record.id).unwrap().quantity, 8);
    }

    #[test]
    fn summary_degrades_to_zeros_when_the_store_is_down() {
        struct DownStore;
        impl RecordStore for DownStore {
            fn list(&self) -> Result<Vec<InventoryRecord>, StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
            fn get(&self, _id: RecordId) -> Result<Option<InventoryRecord>, StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
            fn create(&self, _fields: NewRecord) -> Result<InventoryRecord, StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
            fn update(&self, _id: RecordId, _patch: RecordPatch) -> Result<InventoryRecord, StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
            fn remove(&self, _id: RecordId) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
        }

        let service = LedgerService::new(DownStore, Arc::new(BoundedActivityLog::default()));
        let summary = service.summary(test_now());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.total_value, Decimal::ZERO);
    }
}
