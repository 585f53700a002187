use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::domain::{Cents, Kind, NewTransaction, Status, Transaction, TransactionId};

use super::MIGRATION_001_INITIAL;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordering for full-set and filtered reads.
/// Dashboard views read newest-first; the CSV export reads chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// date ASC, id ASC
    DateAsc,
    /// date DESC, id DESC
    DateDesc,
}

impl SortOrder {
    fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::DateAsc => "date ASC, id ASC",
            SortOrder::DateDesc => "date DESC, id DESC",
        }
    }
}

/// Repository for persisting and querying ledger transactions.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::raw_sql(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Insert a validated transaction and return it with its assigned id.
    pub async fn insert_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        let row = sqlx::query(
            r#"
            INSERT INTO transactions (date, kind, category, description, amount_cents, status)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(new.date.format(DATE_FORMAT).to_string())
        .bind(new.kind.as_str())
        .bind(&new.category)
        .bind(&new.description)
        .bind(new.amount_cents)
        .bind(new.status.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert transaction")?;

        Ok(Transaction {
            id: row.get("id"),
            date: new.date,
            kind: new.kind,
            category: new.category.clone(),
            description: new.description.clone(),
            amount_cents: new.amount_cents,
            status: new.status,
        })
    }

    /// Delete a transaction by id. Returns false when no row matched.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete transaction")?;
        Ok(result.rows_affected() > 0)
    }

    /// List all transactions in the given order.
    pub async fn list_transactions(&self, order: SortOrder) -> Result<Vec<Transaction>> {
        let query = format!(
            "SELECT id, date, kind, category, description, amount_cents, status \
             FROM transactions ORDER BY {}",
            order.as_sql()
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .context("Failed to list transactions")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// List transactions with optional date-range and category filters.
    /// Date bounds are inclusive; an inverted range simply matches nothing.
    pub async fn list_filtered(
        &self,
        from_date: Option<NaiveDate>,
        to_date: Option<NaiveDate>,
        category: Option<&str>,
        order: SortOrder,
    ) -> Result<Vec<Transaction>> {
        // Build query dynamically based on filters
        let mut query = String::from(
            "SELECT id, date, kind, category, description, amount_cents, status \
             FROM transactions WHERE 1=1",
        );

        let from_str = from_date.map(|d| d.format(DATE_FORMAT).to_string());
        let to_str = to_date.map(|d| d.format(DATE_FORMAT).to_string());

        if from_str.is_some() {
            query.push_str(" AND date >= ?");
        }
        if to_str.is_some() {
            query.push_str(" AND date <= ?");
        }
        if category.is_some() {
            query.push_str(" AND category = ?");
        }

        query.push_str(" ORDER BY ");
        query.push_str(order.as_sql());

        let mut sql_query = sqlx::query(&query);

        if let Some(ref from) = from_str {
            sql_query = sql_query.bind(from);
        }
        if let Some(ref to) = to_str {
            sql_query = sql_query.bind(to);
        }
        if let Some(cat) = category {
            sql_query = sql_query.bind(cat);
        }

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .context("Failed to list filtered transactions")?;

        rows.iter().map(Self::row_to_transaction).collect()
    }

    /// Sum the amount for one kind using SQL aggregation, skipping cancelled
    /// rows. This is cheaper than loading the full set when only the totals
    /// are needed.
    pub async fn sum_amount(&self, kind: Kind) -> Result<Cents> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount_cents), 0) as total
            FROM transactions
            WHERE kind = ? AND status != 'cancelled'
            "#,
        )
        .bind(kind.as_str())
        .fetch_one(&self.pool)
        .await
        .context("Failed to sum transactions")?;

        Ok(row.get("total"))
    }

    /// Count all transactions.
    pub async fn count_transactions(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM transactions")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count transactions")?;

        Ok(row.get("count"))
    }

    fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Result<Transaction> {
        let date_str: String = row.get("date");
        let kind_str: String = row.get("kind");
        let status_str: String = row.get("status");

        Ok(Transaction {
            id: row.get("id"),
            date: NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
                .context("Invalid transaction date")?,
            kind: Kind::from_str(&kind_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction kind: {}", kind_str))?,
            category: row.get("category"),
            description: row.get("description"),
            amount_cents: row.get("amount_cents"),
            status: Status::from_str(&status_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid transaction status: {}", status_str))?,
        })
    }
}
