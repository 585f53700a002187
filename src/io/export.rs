use anyhow::Result;
use std::io::Write;

use crate::application::LedgerService;
use crate::domain::format_cents;

/// Exporter for writing ledger data as delimited text.
pub struct Exporter<'a> {
    service: &'a LedgerService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Export all transactions to CSV, in chronological order
    /// (date ascending, id ascending). Returns the number of rows written.
    pub async fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let transactions = self.service.export_transactions().await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "date",
            "kind",
            "category",
            "description",
            "amount",
            "status",
        ])?;

        let mut count = 0;
        for tx in &transactions {
            csv_writer.write_record([
                tx.id.to_string(),
                tx.date.format("%Y-%m-%d").to_string(),
                tx.kind.as_str().to_string(),
                tx.category.clone(),
                tx.description.clone(),
                format_cents(tx.amount_cents),
                tx.status.as_str().to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
