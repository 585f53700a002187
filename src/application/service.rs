use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::domain::{
    compute_totals, group_by_category, group_by_kind, parse_cents, profit_margin, recent,
    CategoryBreakdown, Kind, KindBreakdown, NewTransaction, Status, Totals, Transaction,
    TransactionId,
};
use crate::storage::{Repository, SortOrder};

use super::{AppError, Field};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// How many entries the dashboard shows when no filter is active.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Raw, unvalidated input for a new transaction, exactly as the caller
/// (CLI flag, CSV row) supplied it.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    /// ISO date (YYYY-MM-DD); absent or blank means "today"
    pub date: Option<String>,
    pub kind: String,
    /// Trimmed; absent or blank falls back to "Other"
    pub category: Option<String>,
    pub description: Option<String>,
    /// Decimal amount; a comma decimal separator is accepted
    pub amount: String,
    pub status: String,
}

/// Raw dashboard filter input. Unparseable dates silently disable the
/// corresponding bound instead of failing the request; a category of "All"
/// (or blank) means no category filter.
#[derive(Debug, Clone, Default)]
pub struct DashboardFilter {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub category: Option<String>,
    pub limit: Option<usize>,
}

impl DashboardFilter {
    /// Resolve raw filter strings into typed predicates.
    fn resolve(&self) -> (Option<NaiveDate>, Option<NaiveDate>, Option<String>) {
        let parse = |raw: &Option<String>| {
            raw.as_deref()
                .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
        };

        let category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"))
            .map(str::to_string);

        (parse(&self.from_date), parse(&self.to_date), category)
    }
}

/// Dashboard view model: totals, breakdowns and the recent-or-filtered
/// entry list. Rendering (currency formatting, charts) is the caller's job.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub profit_margin: f64,
    pub by_category: Vec<CategoryBreakdown>,
    pub by_kind: Vec<KindBreakdown>,
    pub entries: Vec<Transaction>,
}

/// Validate a raw draft into a persistable transaction.
/// The first failing field is reported; nothing is persisted on failure.
pub fn validate_draft(draft: &TransactionDraft) -> Result<NewTransaction, AppError> {
    let date = match draft.date.as_deref().map(str::trim) {
        None | Some("") => Local::now().date_naive(),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
            AppError::validation(Field::Date, format!("'{}' is not a valid YYYY-MM-DD date", raw))
        })?,
    };

    let amount_cents = parse_cents(&draft.amount).map_err(|_| {
        AppError::validation(
            Field::Amount,
            format!("'{}' is not a valid amount", draft.amount),
        )
    })?;

    let kind = Kind::from_str(draft.kind.trim()).ok_or_else(|| {
        AppError::validation(
            Field::Kind,
            format!("'{}' is not income or expense", draft.kind),
        )
    })?;

    // Cancelled exists only on legacy rows; it is never accepted on create.
    let status = match Status::from_str(draft.status.trim()) {
        Some(status @ (Status::Paid | Status::Pending)) => status,
        _ => {
            return Err(AppError::validation(
                Field::Status,
                format!("'{}' is not paid or pending", draft.status),
            ));
        }
    };

    if amount_cents < 0 {
        return Err(AppError::validation(
            Field::Amount,
            "amount must not be negative",
        ));
    }

    let category = match draft.category.as_deref().map(str::trim) {
        None | Some("") => "Other".to_string(),
        Some(c) => c.to_string(),
    };

    let mut new = NewTransaction::new(date, kind, amount_cents, status).with_category(category);
    if let Some(description) = draft.description.as_deref().map(str::trim) {
        new = new.with_description(description);
    }
    Ok(new)
}

/// Application service providing high-level operations for the ledger.
/// This is the primary interface for any client (CLI, API, importer).
pub struct LedgerService {
    repo: Repository,
}

impl LedgerService {
    /// Create a new ledger service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Initialize a new database at the given path.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Ok(Self::new(repo))
    }

    /// Validate and persist a new transaction, returning the stored record.
    pub async fn add_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<Transaction, AppError> {
        let new = validate_draft(draft)?;
        Ok(self.repo.insert_transaction(&new).await?)
    }

    /// Delete a transaction by id. Deleting a missing id is an explicit
    /// error, not a silent no-op.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), AppError> {
        if self.repo.delete_transaction(id).await? {
            Ok(())
        } else {
            Err(AppError::TransactionNotFound(id))
        }
    }

    /// List all transactions, newest first.
    pub async fn list_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.repo.list_transactions(SortOrder::DateDesc).await?)
    }

    /// List all transactions in chronological order (backs the CSV export).
    pub async fn export_transactions(&self) -> Result<Vec<Transaction>, AppError> {
        Ok(self.repo.list_transactions(SortOrder::DateAsc).await?)
    }

    /// Count all transactions without loading them.
    pub async fn count_transactions(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_transactions().await?)
    }

    /// Income/expense totals via SQL aggregation, without loading the
    /// full record set.
    pub async fn totals(&self) -> Result<Totals, AppError> {
        let income = self.repo.sum_amount(Kind::Income).await?;
        let expense = self.repo.sum_amount(Kind::Expense).await?;
        Ok(Totals {
            income,
            expense,
            profit: income - expense,
        })
    }

    /// Assemble the dashboard view model.
    ///
    /// Aggregates always cover the whole ledger; the entry list is the
    /// `limit` most recent records, or the full filtered sequence when any
    /// filter resolves.
    pub async fn dashboard(&self, filter: &DashboardFilter) -> Result<Dashboard, AppError> {
        let snapshot = self.repo.list_transactions(SortOrder::DateDesc).await?;

        let totals = compute_totals(&snapshot);
        let margin = profit_margin(&totals);
        let by_category = group_by_category(&snapshot);
        let by_kind = group_by_kind(&snapshot);

        let (from_date, to_date, category) = filter.resolve();
        let entries = if from_date.is_some() || to_date.is_some() || category.is_some() {
            self.repo
                .list_filtered(from_date, to_date, category.as_deref(), SortOrder::DateDesc)
                .await?
        } else {
            recent(&snapshot, filter.limit.unwrap_or(DEFAULT_RECENT_LIMIT))
        };

        Ok(Dashboard {
            totals,
            profit_margin: margin,
            by_category,
            by_kind,
            entries,
        })
    }
}
