use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;
use crate::status::Status;

/// Dashboard statistics over a set of records.
///
/// Pure and recomputed on demand; never cached across mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total: usize,
    pub in_stock: usize,
    pub out_of_stock: usize,
    pub expired: usize,
    pub total_value: Decimal,
}

/// Partition `records` by derived status and total up the stock value.
///
/// The partition is exhaustive and disjoint by construction of
/// [`compute_status`](crate::status::compute_status). Negative quantities
/// (if a backend ever produces them) contribute zero value, not negative.
pub fn summarize(records: &[InventoryRecord], now: DateTime<Utc>) -> StockSummary {
    let mut summary = StockSummary {
        total: records.len(),
        in_stock: 0,
        out_of_stock: 0,
        expired: 0,
        total_value: Decimal::ZERO,
    };

    for record in records {
        match record.status_at(now) {
            Status::InStock => summary.in_stock += 1,
            Status::OutOfStock => summary.out_of_stock += 1,
            Status::Expired => summary.expired += 1,
        }

        summary.total_value += Decimal::from(record.quantity.max(0)) * record.unit_cost;
    }

    summary
}
