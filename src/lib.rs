//! Expense Tracker - personal expense tracking on a local SQLite database
//!
//! Records purchases (name, unit price, units bought, category, date) and
//! reports on them: a per-category monthly breakdown of units bought with a
//! comparison against the yearly average, and a per-category money summary.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management (data directory, database file, audit log)
//! - `error`: Custom error types
//! - `models`: Core data models (expense, category, money, report month)
//! - `storage`: SQLite storage layer
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `reports`: Monthly report and spending summary
//! - `display`: Terminal formatting
//! - `export`: CSV and JSON export
//! - `cli`: Command handlers and the interactive shell
//!
//! # Example
//!
//! ```rust,no_run
//! use expense_tracker::config::ExpensePaths;
//! use expense_tracker::models::{Expense, Money, ReportMonth};
//! use expense_tracker::reports::MonthlyReport;
//! use expense_tracker::services::ExpenseService;
//! use expense_tracker::storage::Storage;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = Storage::open(&ExpensePaths::resolve(None))?;
//! let coffee = Expense::from_date_str("Coffee", Money::parse("4.50")?, 2, "food", "2024-01-05")?;
//! ExpenseService::new(&storage).add(coffee)?;
//!
//! let report = MonthlyReport::generate(&storage, ReportMonth::new(2024, 1)?)?;
//! print!("{}", report.format_terminal());
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
