//! Report periods
//!
//! A [`ReportMonth`] identifies a calendar month and yields the half-open date
//! windows the reports aggregate over.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open date interval `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

/// A calendar month (e.g., "2024-01")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportMonth {
    year: i32,
    month: u32,
}

impl ReportMonth {
    /// Create a month, rejecting month numbers outside 1-12 and unrepresentable years
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        // The window end needs January of the following year to exist too.
        if NaiveDate::from_ymd_opt(year, month, 1).is_none()
            || NaiveDate::from_ymd_opt(year + 1, 1, 1).is_none()
        {
            return Err(PeriodParseError::InvalidYear(year));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following month, rolling December over into January
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month
    pub fn first_day(&self) -> NaiveDate {
        // Construction guarantees the date exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// `[first day of month, first day of next month)`
    pub fn month_window(&self) -> DateWindow {
        DateWindow {
            start: self.first_day(),
            end: self.next().first_day(),
        }
    }

    /// `[January 1st, January 1st of next year)`
    pub fn year_window(&self) -> DateWindow {
        let start = NaiveDate::from_ymd_opt(self.year, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(self.year + 1, 1, 1).unwrap_or(NaiveDate::MAX);
        DateWindow { start, end }
    }

    /// Human label such as "January 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    /// Parse a month string in "YYYY-MM" format
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
    InvalidYear(i32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => {
                write!(f, "Invalid month format: {} (expected YYYY-MM)", s)
            }
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            PeriodParseError::InvalidYear(y) => write!(f, "Invalid year: {}", y),
        }
    }
}

impl std::error::Error for PeriodParseError {}
