use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;

use stockroom_core::RecordId;
use stockroom_ledger::{InventoryRecord, NewRecord};

use super::r#trait::{RecordPatch, RecordStore, StoreError};

/// In-memory record store.
///
/// Intended for tests/dev and as the default backing when no remote store
/// is configured. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<HashMap<RecordId, InventoryRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn list(&self) -> Result<Vec<InventoryRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut all: Vec<InventoryRecord> = records.values().cloned().collect();
        // UUIDv7 ids are time-ordered, so this is insertion order.
        all.sort_by_key(|r| *r.id.as_uuid());
        Ok(all)
    }

    fn get(&self, id: RecordId) -> Result<Option<InventoryRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(records.get(&id).cloned())
    }

    fn create(&self, fields: NewRecord) -> Result<InventoryRecord, StoreError> {
        let now = Utc::now();
        let record = InventoryRecord {
            id: RecordId::new(),
            inventory_code: fields.inventory_code,
            name: fields.name,
            category: fields.category,
            description: fields.description,
            location: fields.location,
            quantity: fields.quantity,
            unit_cost: fields.unit_cost,
            purchase_date: fields.purchase_date.unwrap_or_else(|| now.date_naive()),
            expiry_date: fields.expiry_date,
            created_at: now,
            updated_at: now,
        };

        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        records.insert(record.id, record.clone());
        Ok(record)
    }

    fn update(&self, id: RecordId, patch: RecordPatch) -> Result<InventoryRecord, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let record = records.get_mut(&id).ok_or(StoreError::NotFound)?;

        if let Some(quantity) = patch.quantity {
            record.quantity = quantity;
        }
        if let Some(unit_cost) = patch.unit_cost {
            record.unit_cost = unit_cost;
        }
        if let Some(location) = patch.location {
            record.location = location;
        }
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    fn remove(&self, id: RecordId) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        records.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_lot(name: &str, quantity: i64) -> NewRecord {
        NewRecord {
            inventory_code: None,
            name: name.to_string(),
            category: "supplies".to_string(),
            description: String::new(),
            location: "main store".to_string(),
            quantity,
            unit_cost: Decimal::new(100, 2),
            purchase_date: None,
            expiry_date: None,
        }
    }

    #[test]
    fn create_assigns_id_and_timestamps() {
        let store = InMemoryRecordStore::new();
        let created = store.create(new_lot("Rice", 50)).unwrap();

        assert_eq!(created.quantity, 50);
        assert_eq!(created.purchase_date, created.created_at.date_naive());
        assert_eq!(store.get(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn duplicate_names_stay_separate_lots() {
        let store = InMemoryRecordStore::new();
        let first = store.create(new_lot("Rice", 50)).unwrap();
        let second = store.create(new_lot("Rice", 20)).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn update_patches_only_set_fields() {
        let store = InMemoryRecordStore::new();
        let created = store.create(new_lot("Rice", 50)).unwrap();

        let updated = store
            .update(created.id, RecordPatch::with_quantity(44))
            .unwrap();
        assert_eq!(updated.quantity, 44);
        assert_eq!(updated.location, "main store");
        assert_eq!(updated.unit_cost, created.unit_cost);
    }

    #[test]
    fn remove_missing_record_is_not_found() {
        let store = InMemoryRecordStore::new();
        assert_eq!(store.remove(RecordId::new()), Err(StoreError::NotFound));
    }
}
