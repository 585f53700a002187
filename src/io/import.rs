use anyhow::Result;
use std::io::Read;

use crate::application::{validate_draft, LedgerService, TransactionDraft};

/// Result of an import operation
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub imported: usize,
    pub errors: Vec<ImportError>,
}

/// Error that occurred on a single import line
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Options for import operations
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Validate every row without persisting anything
    pub dry_run: bool,
}

/// Importer for loading exported CSV back into the ledger.
///
/// Rows travel through the same validation path as interactive adds, so a
/// bad row is collected as a per-line error rather than aborting the import.
/// The id column is ignored: the store assigns fresh ids.
pub struct Importer<'a> {
    service: &'a LedgerService,
}

impl<'a> Importer<'a> {
    pub fn new(service: &'a LedgerService) -> Self {
        Self { service }
    }

    /// Import transactions from CSV in the export column layout:
    /// id, date, kind, category, description, amount, status.
    pub async fn import_transactions_csv<R: Read>(
        &self,
        reader: R,
        options: ImportOptions,
    ) -> Result<ImportResult> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut imported = 0;
        let mut errors = Vec::new();

        for (line_num, result) in csv_reader.records().enumerate() {
            let line = line_num + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(r) => r,
                Err(e) => {
                    errors.push(ImportError {
                        line,
                        field: None,
                        error: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };

            let field = |idx: usize| record.get(idx).unwrap_or("").to_string();
            let draft = TransactionDraft {
                date: Some(field(1)),
                kind: field(2),
                category: Some(field(3)),
                description: Some(field(4)),
                amount: field(5),
                status: field(6),
            };

            let outcome = if options.dry_run {
                validate_draft(&draft).map(|_| ())
            } else {
                self.service.add_transaction(&draft).await.map(|_| ())
            };

            match outcome {
                Ok(()) => imported += 1,
                Err(e) => errors.push(ImportError {
                    line,
                    field: e.invalid_field().map(|f| f.to_string()),
                    error: e.to_string(),
                }),
            }
        }

        Ok(ImportResult { imported, errors })
    }
}
