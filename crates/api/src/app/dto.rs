use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use stockroom_ledger::{InventoryRecord, NewRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct AddStockRequest {
    #[serde(default)]
    pub inventory_code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    pub quantity: i64,
    pub unit_cost: Decimal,
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl AddStockRequest {
    pub fn into_new_record(self) -> NewRecord {
        NewRecord {
            inventory_code: self.inventory_code,
            name: self.name,
            category: self.category,
            description: self.description,
            location: self.location,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            purchase_date: self.purchase_date,
            expiry_date: self.expiry_date,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IssueRequest {
    pub quantity: i64,
}

// -------------------------
// Response mapping
// -------------------------

/// Record as the console renders it: stored fields plus the derived status.
pub fn record_json(record: &InventoryRecord, now: DateTime<Utc>) -> serde_json::Value {
    json!({
        "id": record.id,
        "inventory_code": record.inventory_code,
        "display_code": record.display_code(),
        "name": record.name,
        "category": record.category,
        "description": record.description,
        "location": record.location,
        "quantity": record.quantity,
        "unit_cost": record.unit_cost,
        "purchase_date": record.purchase_date,
        "expiry_date": record.expiry_date,
        "status": record.status_at(now).as_str(),
        "created_at": record.created_at,
        "updated_at": record.updated_at,
    })
}
