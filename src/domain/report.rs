use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Cents, Kind, Transaction};

/// Income/expense totals over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub income: Cents,
    pub expense: Cents,
    pub profit: Cents,
}

/// Per-category income and expense sums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub income: Cents,
    pub expense: Cents,
}

/// Total amount per transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindBreakdown {
    pub kind: Kind,
    pub total: Cents,
}

/// Sum income and expense over a snapshot, skipping cancelled rows.
/// Profit = income - expense. All zero for an empty snapshot.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut income = 0;
    let mut expense = 0;

    for tx in transactions {
        if tx.status.is_cancelled() {
            continue;
        }
        match tx.kind {
            Kind::Income => income += tx.amount_cents,
            Kind::Expense => expense += tx.amount_cents,
        }
    }

    Totals {
        income,
        expense,
        profit: income - expense,
    }
}

/// Profit as a percentage of total income.
/// Returns 0.0 when there is no income (never divides by zero).
pub fn profit_margin(totals: &Totals) -> f64 {
    if totals.income > 0 {
        totals.profit as f64 / totals.income as f64 * 100.0
    } else {
        0.0
    }
}

/// Group income and expense sums by category.
///
/// Cancelled rows are counted here, matching the historical category view
/// which never filtered on status. Sorted descending by combined volume
/// (income + expense), ties broken by category name ascending.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryBreakdown> {
    let mut sums: HashMap<&str, (Cents, Cents)> = HashMap::new();

    for tx in transactions {
        let entry = sums.entry(tx.category.as_str()).or_insert((0, 0));
        match tx.kind {
            Kind::Income => entry.0 += tx.amount_cents,
            Kind::Expense => entry.1 += tx.amount_cents,
        }
    }

    let mut rows: Vec<CategoryBreakdown> = sums
        .into_iter()
        .map(|(category, (income, expense))| CategoryBreakdown {
            category: category.to_string(),
            income,
            expense,
        })
        .collect();

    rows.sort_by(|a, b| {
        (b.income + b.expense)
            .cmp(&(a.income + a.expense))
            .then_with(|| a.category.cmp(&b.category))
    });

    rows
}

/// Total amount per kind present in the snapshot, income listed first.
pub fn group_by_kind(transactions: &[Transaction]) -> Vec<KindBreakdown> {
    let mut income = None;
    let mut expense = None;

    for tx in transactions {
        let slot = match tx.kind {
            Kind::Income => &mut income,
            Kind::Expense => &mut expense,
        };
        *slot = Some(slot.unwrap_or(0) + tx.amount_cents);
    }

    let mut rows = Vec::new();
    if let Some(total) = income {
        rows.push(KindBreakdown {
            kind: Kind::Income,
            total,
        });
    }
    if let Some(total) = expense {
        rows.push(KindBreakdown {
            kind: Kind::Expense,
            total,
        });
    }
    rows
}

/// The `limit` most recent transactions, ordered by date descending with id
/// descending as tiebreaker (newest insert wins ties on the same date).
/// `limit = 0` yields an empty list; an oversized limit yields everything.
pub fn recent(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted: Vec<Transaction> = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    sorted.truncate(limit);
    sorted
}
