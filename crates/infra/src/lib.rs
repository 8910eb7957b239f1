//! Infrastructure layer: record-store boundary, activity log, services.

pub mod activity_log;
pub mod in_flight;
pub mod record_store;
pub mod service;


pub use activity_log::{ActivityLog, BoundedActivityLog, DEFAULT_ACTIVITY_CAPACITY};
pub use in_flight::{InFlightGuard, InFlightRegistry};
pub use record_store::{InMemoryRecordStore, RecordPatch, RecordStore, StoreError};
pub use service::{IssueOutcome, LedgerService, RemovalOutcome};
