//! Inventory stock-ledger domain.
//!
//! This crate contains the business rules for the stock ledger, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage):
//! status derivation, issue/add-stock validation, activity-entry shapes,
//! and summary statistics.

pub mod activity;
pub mod record;
pub mod status;
pub mod summary;

pub use activity::{ActivityAction, ActivityEntry, AddStockDetail, IssueDetail, RemovalDetail};
pub use record::{InventoryRecord, NewRecord, RawInventoryRecord};
pub use status::{compute_status, Status};
pub use summary::{summarize, StockSummary};
