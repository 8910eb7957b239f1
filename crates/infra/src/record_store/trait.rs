use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

use stockroom_core::RecordId;
use stockroom_ledger::{InventoryRecord, NewRecord};

/// Record store operation error.
///
/// These are **infrastructure** failures (transport, backend rejection) as
/// opposed to ledger errors (quantity validation, expiry rules).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (network error, timeout, 5xx).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store rejected the request (4xx, malformed payload).
    #[error("store rejected request: {0}")]
    Rejected(String),

    /// The record does not exist in the store.
    #[error("record not found")]
    NotFound,
}

/// Partial update applied by [`RecordStore::update`].
///
/// Unset fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub quantity: Option<i64>,
    pub unit_cost: Option<Decimal>,
    pub location: Option<String>,
}

impl RecordPatch {
    /// Patch that only changes the quantity (the issue workflow's shape).
    pub fn with_quantity(quantity: i64) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}

/// Generic inventory-record store (shape, not transport).
///
/// Implementations must assign `id`, `created_at`, and `updated_at` on
/// create, and bump `updated_at` on update. Stored records never carry an
/// authoritative status; status is derived on read by the ledger.
pub trait RecordStore: Send + Sync {
    fn list(&self) -> Result<Vec<InventoryRecord>, StoreError>;

    fn get(&self, id: RecordId) -> Result<Option<InventoryRecord>, StoreError>;

    fn create(&self, fields: NewRecord) -> Result<InventoryRecord, StoreError>;

    fn update(&self, id: RecordId, patch: RecordPatch) -> Result<InventoryRecord, StoreError>;

    fn remove(&self, id: RecordId) -> Result<(), StoreError>;
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn list(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        (**self).list()
    }

    fn get(&self, id: RecordId) -> Result<Option<InventoryRecord>, StoreError> {
        (**self).get(id)
    }

    fn create(&self, fields: NewRecord) -> Result<InventoryRecord, StoreError> {
        (**self).create(fields)
    }

    fn update(&self, id: RecordId, patch: RecordPatch) -> Result<InventoryRecord, StoreError> {
        (**self).update(id, patch)
    }

    fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        (**self).remove(id)
    }
}
