//! Inventory record store boundary.
//!
//! This module defines an infrastructure-facing abstraction over the remote
//! inventory-record store the ledger persists through, without making any
//! transport assumptions. Every call may fail; the ledger never assumes
//! success.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryRecordStore;
pub use r#trait::{RecordPatch, RecordStore, StoreError};
