//! CSV Export functionality
//!
//! Exports every expense as one CSV row, spreadsheet-compatible.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::format_date;
use crate::storage::Storage;

const HEADER: [&str; 6] = ["ID", "Name", "Price", "Amount", "Category", "Date"];

/// Export all expenses to CSV, in insertion order
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: &mut W) -> ExpenseResult<()> {
    let expenses = storage.expenses().get_all()?;
    let mut csv_writer = ::csv::Writer::from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for expense in &expenses {
        csv_writer.write_record([
            expense.id.map(|id| id.to_string()).unwrap_or_default(),
            expense.name.clone(),
            format!("{:.2}", expense.price.as_dollars()),
            expense.amount.to_string(),
            expense.category.to_string(),
            format_date(expense.date),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    tracing::debug!(rows = expenses.len(), "exported expenses to CSV");
    Ok(())
}
