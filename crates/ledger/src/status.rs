//! Derived stock status.
//!
//! Status is never stored; it is recomputed from `(quantity, expiry_date,
//! now)` on every read. If a backend persists a status string it is treated
//! as a denormalized hint and ignored for all business-rule decisions.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Stock status of one inventory record, derived on read.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InStock,
    OutOfStock,
    Expired,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::InStock => "in_stock",
            Status::OutOfStock => "out_of_stock",
            Status::Expired => "expired",
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the status of a record from its quantity and expiry date.
///
/// Expiry takes precedence over quantity: a record whose expiry date lies
/// strictly before `now` is `Expired` even with stock on hand. Otherwise a
/// non-positive quantity means `OutOfStock`.
///
/// The expiry date is compared at its midnight-UTC instant, matching how
/// the admin console evaluates bare calendar dates.
pub fn compute_status(quantity: i64, expiry_date: Option<NaiveDate>, now: DateTime<Utc>) -> Status {
    if let Some(expiry) = expiry_date {
        if expiry.and_time(NaiveTime::MIN).and_utc() < now {
            return Status::Expired;
        }
    }

    if quantity <= 0 {
        return Status::OutOfStock;
    }

    Status::InStock
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn past_expiry_wins_over_quantity() {
        let status = compute_status(5, Some(date(2020, 1, 1)), at(2024, 1, 1));
        assert_eq!(status, Status::Expired);
    }

    #[test]
    fn zero_quantity_without_expiry_is_out_of_stock() {
        assert_eq!(compute_status(0, None, at(2024, 1, 1)), Status::OutOfStock);
        assert_eq!(compute_status(-3, None, at(2024, 1, 1)), Status::OutOfStock);
    }

    #[test]
    fn positive_quantity_with_future_expiry_is_in_stock() {
        let status = compute_status(10, Some(date(2030, 6, 1)), at(2024, 1, 1));
        assert_eq!(status, Status::InStock);
    }

    #[test]
    fn expiry_on_the_same_day_counts_as_expired_after_midnight() {
        // Midnight UTC of the expiry date is strictly before a mid-day `now`.
        let status = compute_status(10, Some(date(2024, 1, 1)), at(2024, 1, 1));
        assert_eq!(status, Status::Expired);
    }

    #[test]
    fn derivation_is_deterministic() {
        let now = at(2024, 3, 15);
        let first = compute_status(7, Some(date(2024, 3, 20)), now);
        let second = compute_status(7, Some(date(2024, 3, 20)), now);
        assert_eq!(first, second);
    }
}
