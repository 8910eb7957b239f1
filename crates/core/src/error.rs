//! Ledger error model.
//!
//! Keep this focused on the failures a caller can act on: quantity
//! validation, missing records, per-record contention, and persistence
//! failures surfaced by the external store.

use thiserror::Error;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An issue/add-stock amount was not a positive number.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// An issue amount was greater than the current stock on hand.
    #[error("requested {requested} but only {available} available")]
    ExceedsAvailable { requested: i64, available: i64 },

    /// A value failed validation (e.g. empty name, expired record).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested record was not found.
    #[error("not found")]
    NotFound,

    /// Another mutating operation on the same record is still in flight.
    #[error("operation already in flight: {0}")]
    Busy(String),

    /// The underlying record store call failed (network, 4xx/5xx, etc.).
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl LedgerError {
    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn exceeds_available(requested: i64, available: i64) -> Self {
        Self::ExceedsAvailable {
            requested,
            available,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }
}
