//! `stockroom-core` — ledger foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure
//! concerns): strongly-typed identifiers and the error model shared by
//! every layer.

pub mod error;
pub mod id;

pub use error::{LedgerError, LedgerResult};
pub use id::{EntryId, RecordId};
