//! Monthly Report
//!
//! Breaks one calendar month down by category. The quantities aggregated
//! here are units bought (the `amount` column), not money: each category's
//! share of the month is its unit count over the month's unit count, and the
//! annual average is the category's unit count over the whole year divided
//! by twelve.

use std::fmt;
use std::io::Write;

use crate::display::report::{
    column_width, format_percentage, format_units, left_align, right_align, separator,
};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, ReportMonth};
use crate::storage::Storage;

/// How a category's month compares with its flat monthly average for the year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Higher,
    Lower,
    Equal,
}

impl Comparison {
    /// Compare a month's units with the annual units spread over twelve months
    ///
    /// Done in integers (`month * 12` against `annual`) so equality is exact;
    /// widened to i128 so no stored amount can overflow.
    pub fn classify(month_units: i64, annual_units: i64) -> Self {
        match (i128::from(month_units) * 12).cmp(&i128::from(annual_units)) {
            std::cmp::Ordering::Greater => Self::Higher,
            std::cmp::Ordering::Less => Self::Lower,
            std::cmp::Ordering::Equal => Self::Equal,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Higher => "Higher",
            Self::Lower => "Lower",
            Self::Equal => "Equal",
        };
        f.pad(label)
    }
}

/// One category's line in the monthly report
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyCategoryRow {
    pub category: Category,
    /// Units bought in the month
    pub units: i64,
    /// Share of the month's units, 0-100
    pub percentage: f64,
    /// The category's units for the whole year divided by 12
    pub annual_monthly_average: f64,
    pub comparison: Comparison,
}

/// Monthly Report
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    pub month: ReportMonth,
    /// Units bought across every category in the month
    pub total_units: i64,
    /// One row per category with expenses in the month
    pub rows: Vec<MonthlyCategoryRow>,
}

impl MonthlyReport {
    /// Generate the report for one month
    pub fn generate(storage: &Storage, month: ReportMonth) -> ExpenseResult<Self> {
        let repo = storage.expenses();
        let month_window = month.month_window();

        let total_units = repo.sum_amount(month_window)?;
        let monthly = repo.amount_by_category(month_window)?;
        let annual = repo.amount_by_category(month.year_window())?;

        let rows = monthly
            .into_iter()
            .map(|(category, units)| {
                let annual_units = annual.get(&category).copied().unwrap_or(0);
                let percentage = if total_units == 0 {
                    0.0
                } else {
                    units as f64 / total_units as f64 * 100.0
                };

                MonthlyCategoryRow {
                    category,
                    units,
                    percentage,
                    annual_monthly_average: annual_units as f64 / 12.0,
                    comparison: Comparison::classify(units, annual_units),
                }
            })
            .collect();

        tracing::debug!(%month, total_units, "generated monthly report");

        Ok(Self {
            month,
            total_units,
            rows,
        })
    }

    /// Check whether the month had no expenses at all
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for one category, if it had expenses in the month
    pub fn row(&self, category: Category) -> Option<&MonthlyCategoryRow> {
        self.rows.iter().find(|r| r.category == category)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("Monthly Report: {}\n", self.month.label()));

        if self.is_empty() {
            output.push_str(&format!(
                "No expenses recorded for {}.\n",
                self.month.label()
            ));
            return output;
        }

        let headers = [
            "Category",
            "Units",
            "% of Month",
            "Annual Monthly Avg",
            "vs. Average",
        ];

        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.category.to_string(),
                    row.units.to_string(),
                    format_percentage(row.percentage),
                    format_units(row.annual_monthly_average),
                    row.comparison.to_string(),
                ]
            })
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| column_width(header, cells.iter().map(|row| &row[i])))
            .collect();
        let line_width = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);

        output.push_str(&format!("Total units: {}\n\n", self.total_units));
        output.push_str(&format_row(&headers.map(String::from), &widths));
        output.push_str(&separator(line_width));
        output.push('\n');
        for row in &cells {
            output.push_str(&format_row(row, &widths));
        }
        output.push_str(&separator(line_width));
        output.push('\n');

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ExpenseResult<()> {
        writeln!(
            writer,
            "Month,Category,Units,Percentage,Annual Monthly Average,Comparison"
        )
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

        for row in &self.rows {
            writeln!(
                writer,
                "{},{},{},{:.2},{:.2},{}",
                self.month,
                row.category,
                row.units,
                row.percentage,
                row.annual_monthly_average,
                row.comparison
            )
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        }

        Ok(())
    }
}

/// Category left-aligned, numbers right-aligned, comparison left-aligned
fn format_row(cells: &[String; 5], widths: &[usize]) -> String {
    format!(
        "{} | {} | {} | {} | {}\n",
        left_align(&cells[0], widths[0]),
        right_align(&cells[1], widths[1]),
        right_align(&cells[2], widths[2]),
        right_align(&cells[3], widths[3]),
        left_align(&cells[4], widths[4]),
    )
}
