// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use caixa::application::{LedgerService, TransactionDraft};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = LedgerService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Build a draft with all fields set, the way a form submission would
pub fn draft(date: &str, kind: &str, category: &str, amount: &str, status: &str) -> TransactionDraft {
    TransactionDraft {
        date: Some(date.to_string()),
        kind: kind.to_string(),
        category: Some(category.to_string()),
        description: None,
        amount: amount.to_string(),
        status: status.to_string(),
    }
}

/// Seed a small mixed ledger used by dashboard and export tests
pub async fn seed_basic(service: &LedgerService) -> Result<()> {
    service
        .add_transaction(&draft("2024-01-10", "income", "Bookings", "200.00", "paid"))
        .await?;
    service
        .add_transaction(&draft("2024-01-15", "expense", "Cleaning", "45.00", "paid"))
        .await?;
    service
        .add_transaction(&draft("2024-02-01", "income", "Bookings", "150.00", "pending"))
        .await?;
    service
        .add_transaction(&draft("2024-02-05", "expense", "Fees", "30.00", "paid"))
        .await?;
    Ok(())
}
