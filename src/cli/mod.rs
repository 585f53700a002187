use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::application::{Dashboard, DashboardFilter, LedgerService, TransactionDraft};
use crate::domain::{format_cents, Totals, Transaction};
use crate::io::{Exporter, ImportOptions, Importer};

/// Caixa - Income/Expense Ledger
#[derive(Parser)]
#[command(name = "caixa")]
#[command(about = "A local-first income/expense ledger for the command line")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, default_value = "caixa.db")]
    pub database: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a new transaction
    Add {
        /// Amount (e.g., "50.00", "50" or "12,50")
        amount: String,

        /// Transaction kind: income or expense
        #[arg(short, long)]
        kind: String,

        /// Settlement status: paid or pending
        #[arg(short, long)]
        status: String,

        /// Date of the transaction (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Category label (defaults to "Other")
        #[arg(short, long)]
        category: Option<String>,

        /// Description of the transaction
        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Delete a transaction by id
    Delete {
        /// Transaction id
        id: i64,
    },

    /// List all transactions, newest first
    List,

    /// Show totals, breakdowns and recent or filtered entries
    Dashboard {
        /// Filter from date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Filter to date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Filter by category ("All" disables the filter)
        #[arg(long)]
        category: Option<String>,

        /// Maximum number of recent entries to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export all transactions as CSV, in chronological order
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import transactions from a CSV export
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Validate without importing
        #[arg(long)]
        dry_run: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Database initialized: {}", self.database);
            }

            Commands::Add {
                amount,
                kind,
                status,
                date,
                category,
                description,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let draft = TransactionDraft {
                    date,
                    kind,
                    category,
                    description,
                    amount,
                    status,
                };

                let tx = service.add_transaction(&draft).await?;
                println!(
                    "Recorded {}: {} [{}] {} (id {})",
                    tx.kind,
                    format_cents(tx.amount_cents),
                    tx.category,
                    tx.date,
                    tx.id
                );
            }

            Commands::Delete { id } => {
                let service = LedgerService::connect(&self.database).await?;
                service.delete_transaction(id).await?;
                println!("Deleted transaction {}", id);
            }

            Commands::List => {
                let service = LedgerService::connect(&self.database).await?;
                let transactions = service.list_transactions().await?;
                let totals = service.totals().await?;
                print_transactions(&transactions);
                print_totals(&totals);
            }

            Commands::Dashboard {
                from,
                to,
                category,
                limit,
                format,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let filter = DashboardFilter {
                    from_date: from,
                    to_date: to,
                    category,
                    limit,
                };

                let dashboard = service.dashboard(&filter).await?;
                match format.as_str() {
                    "json" => println!("{}", serde_json::to_string_pretty(&dashboard)?),
                    "table" => print_dashboard(&dashboard),
                    other => anyhow::bail!("Unknown format '{}'. Use table or json", other),
                }
            }

            Commands::Export { output } => {
                let service = LedgerService::connect(&self.database).await?;
                let exporter = Exporter::new(&service);

                let count = match &output {
                    Some(path) => {
                        let file = std::fs::File::create(path)?;
                        exporter.export_transactions_csv(file).await?
                    }
                    None => exporter.export_transactions_csv(std::io::stdout()).await?,
                };

                if let Some(path) = output {
                    println!("Exported {} transaction(s) to {}", count, path);
                }
            }

            Commands::Import { input, dry_run } => {
                let service = LedgerService::connect(&self.database).await?;
                let importer = Importer::new(&service);
                let options = ImportOptions { dry_run };

                let result = match input {
                    Some(path) => {
                        let file = std::fs::File::open(path)?;
                        importer.import_transactions_csv(file, options).await?
                    }
                    None => {
                        importer
                            .import_transactions_csv(std::io::stdin(), options)
                            .await?
                    }
                };

                let verb = if dry_run { "Validated" } else { "Imported" };
                println!("{} {} transaction(s)", verb, result.imported);
                for error in &result.errors {
                    match &error.field {
                        Some(field) => {
                            eprintln!("  line {}: {} ({})", error.line, error.error, field)
                        }
                        None => eprintln!("  line {}: {}", error.line, error.error),
                    }
                }
            }
        }

        Ok(())
    }
}

fn print_transactions(transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<6} {:<12} {:<8} {:<16} {:>12} {:<9} DESCRIPTION",
        "ID", "DATE", "KIND", "CATEGORY", "AMOUNT", "STATUS"
    );
    println!("{}", "-".repeat(80));
    for tx in transactions {
        println!(
            "{:<6} {:<12} {:<8} {:<16} {:>12} {:<9} {}",
            tx.id,
            tx.date.to_string(),
            tx.kind.as_str(),
            tx.category,
            format_cents(tx.amount_cents),
            tx.status.as_str(),
            tx.description
        );
    }
}

fn print_totals(totals: &Totals) {
    println!();
    println!("Income:  {:>12}", format_cents(totals.income));
    println!("Expense: {:>12}", format_cents(totals.expense));
    println!("Profit:  {:>12}", format_cents(totals.profit));
}

fn print_dashboard(dashboard: &Dashboard) {
    print_totals(&dashboard.totals);
    println!("Margin:  {:>11.1}%", dashboard.profit_margin);

    if !dashboard.by_category.is_empty() {
        println!();
        println!("{:<16} {:>12} {:>12}", "CATEGORY", "INCOME", "EXPENSE");
        println!("{}", "-".repeat(42));
        for row in &dashboard.by_category {
            println!(
                "{:<16} {:>12} {:>12}",
                row.category,
                format_cents(row.income),
                format_cents(row.expense)
            );
        }
    }

    if !dashboard.by_kind.is_empty() {
        println!();
        println!("{:<8} {:>12}", "KIND", "TOTAL");
        println!("{}", "-".repeat(21));
        for row in &dashboard.by_kind {
            println!("{:<8} {:>12}", row.kind.as_str(), format_cents(row.total));
        }
    }

    println!();
    print_transactions(&dashboard.entries);
}
