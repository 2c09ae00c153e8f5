//! Export module for the expense tracker
//!
//! - CSV: one row per expense (spreadsheet-compatible)
//! - JSON: machine-readable export with schema version and metadata

pub mod csv;
pub mod json;

pub use csv::export_expenses_csv;
pub use json::{export_expenses_json, ExpenseExport, ExportMetadata, EXPORT_SCHEMA_VERSION};
