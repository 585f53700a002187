use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Cents;

/// Transaction ids are assigned by the store (SQLite AUTOINCREMENT) and are
/// monotonically increasing, so they double as an insertion-order tiebreaker.
pub type TransactionId = i64;

/// Classification of a transaction: money coming in or going out.
/// Localized display labels belong to the presentation layer; the core only
/// knows the canonical variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Kind::Income),
            "expense" => Some(Kind::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement state of a transaction.
///
/// `Cancelled` is a legacy state: existing rows may carry it and totals skip
/// them, but the create path only ever produces `Paid` or `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Paid,
    Pending,
    Cancelled,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Paid => "paid",
            Status::Pending => "pending",
            Status::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "paid" => Some(Status::Paid),
            "pending" => Some(Status::Pending),
            "cancelled" => Some(Status::Cancelled),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Status::Cancelled)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. Immutable once persisted - there is no edit
/// operation, only create and delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    /// Calendar date of the transaction (no time component)
    pub date: NaiveDate,
    pub kind: Kind,
    /// Free-text label, never empty ("Other" when the caller left it blank)
    pub category: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Amount in cents, always >= 0; sign is implied by `kind`
    pub amount_cents: Cents,
    pub status: Status,
}

/// A fully validated transaction that has not been persisted yet.
/// The id is assigned by the repository on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub kind: Kind,
    pub category: String,
    pub description: String,
    pub amount_cents: Cents,
    pub status: Status,
}

impl NewTransaction {
    pub fn new(date: NaiveDate, kind: Kind, amount_cents: Cents, status: Status) -> Self {
        assert!(amount_cents >= 0, "Transaction amount must be non-negative");
        Self {
            date,
            kind,
            category: "Other".to_string(),
            description: String::new(),
            amount_cents,
            status,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(Kind::from_str("income"), Some(Kind::Income));
        assert_eq!(Kind::from_str("Expense"), Some(Kind::Expense));
        assert_eq!(Kind::from_str("transfer"), None);
        assert_eq!(Kind::from_str(""), None);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(Status::from_str("paid"), Some(Status::Paid));
        assert_eq!(Status::from_str("Pending"), Some(Status::Pending));
        assert_eq!(Status::from_str("cancelled"), Some(Status::Cancelled));
        assert_eq!(Status::from_str("done"), None);
    }

    #[test]
    fn test_new_transaction_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let tx = NewTransaction::new(date, Kind::Expense, 1250, Status::Paid);

        assert_eq!(tx.category, "Other");
        assert_eq!(tx.description, "");
        assert_eq!(tx.amount_cents, 1250);
    }
}
