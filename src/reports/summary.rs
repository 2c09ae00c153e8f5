//! Spending Summary
//!
//! Money spent per category over a date range. Totals are sums of the
//! `price` column, the same figure the running total reports.

use chrono::NaiveDate;
use std::io::Write;

use crate::display::report::format_percentage;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{format_date, Category, Money};
use crate::storage::Storage;

/// Spending for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: Category,
    pub total: Money,
    /// Number of expenses
    pub count: usize,
    /// Percentage of the period's total
    pub percentage: f64,
}

/// Spending Summary
#[derive(Debug, Clone)]
pub struct SpendingSummary {
    /// Start date (inclusive)
    pub start_date: NaiveDate,
    /// End date (inclusive)
    pub end_date: NaiveDate,
    /// Set when the summary covers exactly one calendar year
    pub year: Option<i32>,
    /// Categories with spending, largest first
    pub categories: Vec<CategorySpending>,
    pub total: Money,
    pub count: usize,
}

impl SpendingSummary {
    /// Generate a summary for a date range, both ends inclusive
    pub fn generate(
        storage: &Storage,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> ExpenseResult<Self> {
        if start_date > end_date {
            return Err(ExpenseError::Validation(format!(
                "Start date {} is after end date {}",
                format_date(start_date),
                format_date(end_date)
            )));
        }

        let totals = storage
            .expenses()
            .price_by_category(start_date, end_date)?;

        let total: Money = totals.iter().map(|t| t.total).sum();
        let count = totals.iter().map(|t| t.count).sum();

        let mut categories: Vec<CategorySpending> = totals
            .into_iter()
            .map(|t| CategorySpending {
                category: t.category,
                total: t.total,
                count: t.count,
                percentage: share(t.total, total),
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total));

        Ok(Self {
            start_date,
            end_date,
            year: None,
            categories,
            total,
            count,
        })
    }

    /// Generate a summary for one calendar year
    pub fn for_year(storage: &Storage, year: i32) -> ExpenseResult<Self> {
        let (start, end) = year_bounds(year)?;
        let mut summary = Self::generate(storage, start, end)?;
        summary.year = Some(year);
        Ok(summary)
    }

    /// Total spent in one calendar year; zero when nothing was recorded
    pub fn yearly_total(storage: &Storage, year: i32) -> ExpenseResult<Money> {
        Ok(Self::for_year(storage, year)?.total)
    }

    /// A category's spending spread flat over twelve months
    ///
    /// Only meaningful for a yearly summary; `None` otherwise or when the
    /// category had no spending.
    pub fn monthly_average(&self, category: Category) -> Option<Money> {
        self.year?;
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| Money::from_cents((c.total.cents() as f64 / 12.0).round() as i64))
    }

    /// Check whether the period had no expenses
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        match self.year {
            Some(year) => output.push_str(&format!("Spending Summary: {}\n", year)),
            None => output.push_str(&format!(
                "Spending Summary: {} to {}\n",
                format_date(self.start_date),
                format_date(self.end_date)
            )),
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.is_empty() {
            output.push_str("No expenses in this period.\n");
            return output;
        }

        output.push_str(&format!("Total Spent: {}\n", self.total));
        output.push_str(&format!("Expenses: {}\n\n", self.count));

        let with_average = self.year.is_some();
        if with_average {
            output.push_str(&format!(
                "{:<16} {:>12} {:>7} {:>8} {:>12}\n",
                "Category", "Total", "Count", "%", "Avg/Month"
            ));
        } else {
            output.push_str(&format!(
                "{:<16} {:>12} {:>7} {:>8}\n",
                "Category", "Total", "Count", "%"
            ));
        }
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for spending in &self.categories {
            output.push_str(&format!(
                "{:<16} {:>12} {:>7} {:>8}",
                spending.category,
                spending.total,
                spending.count,
                format_percentage(spending.percentage)
            ));
            if let Some(average) = self.monthly_average(spending.category) {
                output.push_str(&format!(" {:>12}", average));
            }
            output.push('\n');
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>12} {:>7}\n",
            "TOTAL", self.total, self.count
        ));

        output
    }

    /// Export the summary to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        writeln!(writer, "Start Date,End Date,Category,Total,Count,Percentage")
            .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for spending in &self.categories {
            writeln!(
                writer,
                "{},{},{},{:.2},{},{:.2}",
                format_date(self.start_date),
                format_date(self.end_date),
                spending.category,
                spending.total.as_dollars(),
                spending.count,
                spending.percentage
            )
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

fn share(part: Money, whole: Money) -> f64 {
    if whole.is_zero() {
        0.0
    } else {
        part.cents() as f64 / whole.cents() as f64 * 100.0
    }
}

fn year_bounds(year: i32) -> ExpenseResult<(NaiveDate, NaiveDate)> {
    match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 12, 31),
    ) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(ExpenseError::Validation(format!("Invalid year: {}", year))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Expense;

    fn create_test_storage() -> Storage {
        Storage::open_in_memory().unwrap()
    }

    fn add(storage: &Storage, name: &str, cents: i64, category: &str, date: &str) {
        let expense =
            Expense::from_date_str(name, Money::from_cents(cents), 1, category, date).unwrap();
        storage.expenses().insert(&expense).unwrap();
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generate_summary() {
        let storage = create_test_storage();
        add(&storage, "Coffee", 450, "food", "2024-01-05");
        add(&storage, "Lunch", 1550, "food", "2024-01-12");
        add(&storage, "Bus", 2000, "transportation", "2024-01-10");
        add(&storage, "Outside", 9999, "rent", "2024-02-01");

        let summary =
            SpendingSummary::generate(&storage, date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        assert_eq!(summary.total, Money::from_cents(4000));
        assert_eq!(summary.count, 3);
        assert_eq!(summary.categories.len(), 2);

        // Equal totals keep category order: food before transportation
        assert_eq!(summary.categories[0].category, Category::Food);
        assert_eq!(summary.categories[0].count, 2);
        assert!((summary.categories[0].percentage - 50.0).abs() < 1e-9);
        assert!(summary.monthly_average(Category::Food).is_none());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let storage = create_test_storage();
        add(&storage, "First", 100, "other", "2024-03-01");
        add(&storage, "Last", 200, "other", "2024-03-31");

        let summary =
            SpendingSummary::generate(&storage, date(2024, 3, 1), date(2024, 3, 31)).unwrap();
        assert_eq!(summary.total, Money::from_cents(300));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let storage = create_test_storage();
        let err = SpendingSummary::generate(&storage, date(2024, 3, 31), date(2024, 3, 1))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_yearly_total_and_average() {
        let storage = create_test_storage();
        add(&storage, "Rent Jan", 120000, "rent", "2024-01-01");
        add(&storage, "Rent Feb", 120000, "rent", "2024-02-01");
        add(&storage, "Power", 1200, "utilities", "2024-07-15");
        add(&storage, "Last year", 5000, "rent", "2023-12-31");

        assert_eq!(
            SpendingSummary::yearly_total(&storage, 2024).unwrap(),
            Money::from_cents(241200)
        );
        assert_eq!(
            SpendingSummary::yearly_total(&storage, 2022).unwrap(),
            Money::zero()
        );

        let summary = SpendingSummary::for_year(&storage, 2024).unwrap();
        assert_eq!(
            summary.monthly_average(Category::Rent),
            Some(Money::from_cents(20000))
        );
        assert_eq!(
            summary.monthly_average(Category::Utilities),
            Some(Money::from_cents(100))
        );
        assert_eq!(summary.monthly_average(Category::Food), None);
        assert!(summary.format_terminal().contains("Avg/Month"));
    }

    #[test]
    fn test_empty_summary() {
        let storage = create_test_storage();
        let summary = SpendingSummary::for_year(&storage, 2024).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total, Money::zero());
        assert!(summary.format_terminal().contains("No expenses in this period."));
    }

    #[test]
    fn test_export_csv() {
        let storage = create_test_storage();
        add(&storage, "Coffee", 450, "food", "2024-01-05");

        let summary =
            SpendingSummary::generate(&storage, date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let mut csv = Vec::new();
        summary.export_csv(&mut csv).unwrap();
        let csv = String::from_utf8(csv).unwrap();
        assert!(csv.contains("2024-01-01,2024-01-31,food,4.50,1,100.00"));
    }
}
