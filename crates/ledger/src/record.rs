use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{LedgerError, LedgerResult, RecordId};

use crate::status::{compute_status, Status};

/// One physical stock lot, normalized at the ingestion boundary.
///
/// Field presence is resolved exactly once (see [`RawInventoryRecord`]);
/// internal logic never branches on "which field name is present".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    /// Human-readable business identifier; may be absent in the backing
    /// store, in which case [`InventoryRecord::display_code`] falls back to
    /// the record id.
    pub inventory_code: Option<String>,
    pub name: String,
    pub category: String,
    pub description: String,
    pub location: String,
    /// Current count on hand. Mutated only by issue, return/delete, or
    /// add-stock operations.
    pub quantity: i64,
    /// Cost per unit at time of last purchase.
    pub unit_cost: Decimal,
    pub purchase_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryRecord {
    /// Business identifier shown to operators.
    pub fn display_code(&self) -> String {
        self.inventory_code
            .clone()
            .unwrap_or_else(|| self.id.to_string())
    }

    /// Derive the stock status at `now`. Never cached.
    pub fn status_at(&self, now: DateTime<Utc>) -> Status {
        compute_status(self.quantity, self.expiry_date, now)
    }

    /// Validate an issue request and return the resulting quantity.
    ///
    /// Rejects non-positive amounts (`InvalidQuantity`), records that have
    /// expired (issue is only offered for in-stock lots, but the operation
    /// validates regardless of what the UI filtered), and amounts above the
    /// current stock (`ExceedsAvailable`).
    pub fn validate_issue(&self, requested: i64, now: DateTime<Utc>) -> LedgerResult<i64> {
        if requested <= 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "issue quantity must be positive, got {requested}"
            )));
        }

        if self.status_at(now) == Status::Expired {
            return Err(LedgerError::validation("record is expired"));
        }

        if requested > self.quantity {
            return Err(LedgerError::exceeds_available(requested, self.quantity));
        }

        Ok(self.quantity - requested)
    }
}

/// Input for the add-stock workflow (receiving a new lot).
///
/// Always creates a new lot; duplicate-name lots are intentionally kept
/// separate (no merge-by-name dedup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecord {
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
    /// Defaults to today when absent.
    #[serde(default)]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
}

impl NewRecord {
    pub fn validate(&self) -> LedgerResult<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::validation("name cannot be empty"));
        }
        if self.quantity <= 0 {
            return Err(LedgerError::invalid_quantity(format!(
                "received quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.unit_cost < Decimal::ZERO {
            return Err(LedgerError::validation("unit cost cannot be negative"));
        }
        Ok(())
    }

    /// Resolve the effective purchase date.
    pub fn purchase_date_or(&self, today: NaiveDate) -> NaiveDate {
        self.purchase_date.unwrap_or(today)
    }
}

/// Duck-typed record shape as returned by the remote inventory API.
///
/// The backend uses inconsistent field names (`inventoryID` vs `_id`,
/// optional `location`), string dates, and sometimes a denormalized
/// `status` string. All defaulting and aliasing is resolved here, once, by
/// [`RawInventoryRecord::normalize`]; the persisted status hint is
/// discarded (status is always re-derived).
#[derive(Debug, Clone, Deserialize)]
pub struct RawInventoryRecord {
    /// Store-assigned identifier; a missing id gets a fresh one.
    #[serde(default, alias = "_id")]
    pub id: Option<RecordId>,
    #[serde(default, alias = "inventoryID", alias = "inventoryCode")]
    pub inventory_code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, alias = "unitCost")]
    pub unit_cost: Decimal,
    #[serde(default, alias = "purchaseDate")]
    pub purchase_date: Option<String>,
    #[serde(default, alias = "expiryDate")]
    pub expiry_date: Option<String>,
    /// Denormalized hint only; never authoritative.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RawInventoryRecord {
    /// Apply defaulting rules and produce a normalized record.
    ///
    /// Date strings are parsed leniently (`YYYY-MM-DD`, then RFC 3339); an
    /// unparseable expiry date is treated as "no expiry", matching the
    /// derivation rule that only a successfully parsed expiry can mark a
    /// record expired. An unparseable purchase date falls back to today.
    pub fn normalize(self, now: DateTime<Utc>) -> InventoryRecord {
        let today = now.date_naive();

        InventoryRecord {
            id: self.id.unwrap_or_default(),
            inventory_code: self.inventory_code.filter(|c| !c.trim().is_empty()),
            name: self.name,
            category: self.category.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            purchase_date: self
                .purchase_date
                .as_deref()
                .and_then(parse_calendar_date)
                .unwrap_or(today),
            expiry_date: self.expiry_date.as_deref().and_then(parse_calendar_date),
            created_at: self.created_at.unwrap_or(now),
            updated_at: self.updated_at.unwrap_or(now),
        }
    }
}

fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
