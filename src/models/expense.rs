//! Expense model
//!
//! One purchase event: what was bought, what it cost per unit, how many units,
//! its category and the calendar day it happened on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::money::Money;

/// The single date format used for input, storage and display.
///
/// It is fixed width, so lexical order of the stored text equals
/// chronological order, which the date range queries rely on.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row identifier assigned by the store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for ExpenseId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        Ok(Self(s.parse()?))
    }
}

/// Validation errors raised while building an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyName,
    InvalidDate(String),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Expense name cannot be empty"),
            Self::InvalidDate(s) => {
                write!(f, "Invalid date '{}': expected a calendar date as YYYY-MM-DD", s)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

/// Parse a calendar date in the fixed `YYYY-MM-DD` format
pub fn parse_date(input: &str) -> Result<NaiveDate, ExpenseValidationError> {
    let trimmed = input.trim();
    if trimmed.len() != 10 {
        return Err(ExpenseValidationError::InvalidDate(trimmed.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| ExpenseValidationError::InvalidDate(trimmed.to_string()))
}

/// Render a date in the fixed `YYYY-MM-DD` format
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A single expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store identifier; `None` until the expense has been inserted
    pub id: Option<ExpenseId>,

    /// What was bought
    pub name: String,

    /// Cost per unit
    pub price: Money,

    /// Number of units bought
    pub amount: i64,

    pub category: Category,

    pub date: NaiveDate,
}

impl Expense {
    /// Create a new, not yet persisted, expense
    ///
    /// The category text is normalized (unknown values become `other`).
    /// Price and amount are taken as given.
    pub fn new(
        name: impl Into<String>,
        price: Money,
        amount: i64,
        category: &str,
        date: NaiveDate,
    ) -> Result<Self, ExpenseValidationError> {
        let expense = Self {
            id: None,
            name: name.into(),
            price,
            amount,
            category: Category::normalize(category),
            date,
        };
        expense.validate()?;
        Ok(expense)
    }

    /// Create an expense from a textual date, failing if it is not a calendar date
    pub fn from_date_str(
        name: impl Into<String>,
        price: Money,
        amount: i64,
        category: &str,
        date: &str,
    ) -> Result<Self, ExpenseValidationError> {
        let date = parse_date(date)?;
        Self::new(name, price, amount, category, date)
    }

    /// Attach the identifier assigned by the store
    pub fn with_id(mut self, id: ExpenseId) -> Self {
        self.id = Some(id);
        self
    }

    /// Check the record invariants
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyName);
        }
        Ok(())
    }

    /// Money spent on this line (price x amount), `None` if it does not fit
    pub fn line_total(&self) -> Option<Money> {
        self.price
            .cents()
            .checked_mul(self.amount)
            .map(Money::from_cents)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Price: {}, Amount: {}, Category: {}, Date: {}",
            self.name,
            self.price,
            self.amount,
            self.category,
            format_date(self.date)
        )
    }
}

/// A partial edit of an expense's mutable fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseChanges {
    pub price: Option<Money>,
    pub amount: Option<i64>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

impl ExpenseChanges {
    /// Check whether any field would change
    pub fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.amount.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }

    /// Apply the edit in memory
    pub fn apply_to(&self, expense: &mut Expense) {
        if let Some(price) = self.price {
            expense.price = price;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
    }
}
