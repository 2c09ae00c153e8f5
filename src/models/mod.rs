//! Core data models for the expense tracker
//!
//! This module contains the record model (expense, category, money) and the
//! period types used by the reports.

pub mod category;
pub mod expense;
pub mod money;
pub mod period;

pub use category::Category;
pub use expense::{
    format_date, parse_date, Expense, ExpenseChanges, ExpenseId, ExpenseValidationError,
    DATE_FORMAT,
};
pub use money::{Money, MoneyParseError};
pub use period::{DateWindow, PeriodParseError, ReportMonth};
