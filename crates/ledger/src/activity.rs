//! Audit trail shapes for ledger mutations.
//!
//! One entry is appended per successful mutating operation; validation and
//! persistence failures never produce an entry. Entries live client-side of
//! the record store in a bounded local log, so there is no server-enforced
//! foreign key back to the record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{EntryId, RecordId};

/// Detail payload for an `ISSUE` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub qty: i64,
    pub prev_qty: i64,
    pub new_qty: i64,
}

/// Detail payload for `RETURN` and `DELETE` actions (full lot removal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalDetail {
    /// Quantity on hand at the time of removal.
    pub qty: i64,
    pub removed: bool,
}

/// Detail payload for an `ADD_STOCK` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddStockDetail {
    pub qty: i64,
    pub unit_cost: Decimal,
    pub category: String,
    pub location: String,
}

/// One ledger mutation, tagged the way the admin console renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    AddStock(AddStockDetail),
    Issue(IssueDetail),
    Return(RemovalDetail),
    Delete(RemovalDetail),
}

impl ActivityAction {
    pub fn action_type(&self) -> &'static str {
        match self {
            ActivityAction::AddStock(_) => "ADD_STOCK",
            ActivityAction::Issue(_) => "ISSUE",
            ActivityAction::Return(_) => "RETURN",
            ActivityAction::Delete(_) => "DELETE",
        }
    }
}

/// An audit record of one ledger mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub entry_id: EntryId,
    pub record_id: RecordId,
    /// Record name at the time of the action (records may be removed later).
    pub record_name: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(flatten)]
    pub action: ActivityAction,
}

impl ActivityEntry {
    pub fn new(
        record_id: RecordId,
        record_name: impl Into<String>,
        occurred_at: DateTime<Utc>,
        action: ActivityAction,
    ) -> Self {
        Self {
            entry_id: EntryId::new(),
            record_id,
            record_name: record_name.into(),
            occurred_at,
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_types_match_console_labels() {
        let issue = ActivityAction::Issue(IssueDetail {
            qty: 4,
            prev_qty: 10,
            new_qty: 6,
        });
        assert_eq!(issue.action_type(), "ISSUE");

        let removal = ActivityAction::Return(RemovalDetail {
            qty: 3,
            removed: true,
        });
        assert_eq!(removal.action_type(), "RETURN");
        assert_eq!(
            ActivityAction::Delete(RemovalDetail {
                qty: 0,
                removed: true
            })
            .action_type(),
            "DELETE"
        );
    }

    #[test]
    fn entries_serialize_with_a_flat_action_tag() {
        let entry = ActivityEntry::new(
            RecordId::new(),
            "Rice",
            Utc::now(),
            ActivityAction::Issue(IssueDetail {
                qty: 4,
                prev_qty: 10,
                new_qty: 6,
            }),
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["action"], "ISSUE");
        assert_eq!(value["qty"], 4);
        assert_eq!(value["prev_qty"], 10);
        assert_eq!(value["new_qty"], 6);
        assert_eq!(value["record_name"], "Rice");
    }
}
