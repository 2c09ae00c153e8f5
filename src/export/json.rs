//! JSON Export functionality
//!
//! Exports every expense to JSON with schema versioning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{format_date, Expense, Money};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All expenses, prices in cents
    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub expense_count: usize,

    /// Sum of all prices, in cents
    pub total_spent: Money,

    pub earliest_expense: Option<String>,

    pub latest_expense: Option<String>,
}

impl ExpenseExport {
    /// Create a new export from storage
    pub fn from_storage(storage: &Storage) -> ExpenseResult<Self> {
        let repo = storage.expenses();
        let expenses = repo.get_all()?;

        let metadata = ExportMetadata {
            expense_count: expenses.len(),
            total_spent: repo.total_price()?,
            earliest_expense: expenses.iter().map(|e| e.date).min().map(format_date),
            latest_expense: expenses.iter().map(|e| e.date).max().map(format_date),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            expenses,
            metadata,
        })
    }
}

/// Export all expenses to JSON
pub fn export_expenses_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> ExpenseResult<()> {
    let export = ExpenseExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| ExpenseError::Export(e.to_string()))?;

    Ok(())
}
