//! Reports for the expense tracker
//!
//! - `MonthlyReport`: units bought per category in one month, with each
//!   category's share and a comparison against its flat yearly average.
//! - `SpendingSummary`: money spent per category over a date range or year.

pub mod monthly;
pub mod summary;

pub use monthly::{Comparison, MonthlyCategoryRow, MonthlyReport};
pub use summary::{CategorySpending, SpendingSummary};
