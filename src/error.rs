//! Custom error types for the expense tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for expense tracker operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed input caught while building a record
    #[error("Validation error: {0}")]
    Validation(String),

    /// A record handed to the store is not fit to be persisted
    #[error("Invalid expense: {0}")]
    InvalidArgument(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A name lookup matched more than one row
    #[error("Expense name '{name}' is ambiguous: matches ids {}", format_ids(.ids))]
    AmbiguousName { name: String, ids: Vec<i64> },

    /// Database errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ExpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<rusqlite::Error> for ExpenseError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<crate::models::ExpenseValidationError> for ExpenseError {
    fn from(err: crate::models::ExpenseValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::MoneyParseError> for ExpenseError {
    fn from(err: crate::models::MoneyParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<crate::models::PeriodParseError> for ExpenseError {
    fn from(err: crate::models::PeriodParseError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for expense tracker operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = ExpenseError::expense_not_found("Coffee");
        assert_eq!(err.to_string(), "Expense not found: Coffee");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_ambiguous_name_error() {
        let err = ExpenseError::AmbiguousName {
            name: "Coffee".into(),
            ids: vec![3, 7],
        };
        assert_eq!(
            err.to_string(),
            "Expense name 'Coffee' is ambiguous: matches ids 3, 7"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }

    #[test]
    fn test_from_rusqlite_error() {
        let err: ExpenseError = rusqlite::Error::QueryReturnedNoRows.into();
        assert!(matches!(err, ExpenseError::Storage(_)));
    }

    #[test]
    fn test_from_model_errors_are_validation() {
        let err: ExpenseError = crate::models::ExpenseValidationError::EmptyName.into();
        assert!(err.is_validation());

        let err: ExpenseError = crate::models::ReportMonth::parse("2024-13").unwrap_err().into();
        assert!(err.is_validation());
    }
}
