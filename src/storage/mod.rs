//! Storage layer for the expense tracker
//!
//! [`Storage`] owns the SQLite connection for the lifetime of the process:
//! it is opened once, handed by reference to services and reports, and
//! closed when dropped (or explicitly through [`Storage::close`]).

pub mod expenses;
pub mod schema;

pub use expenses::{CategoryPriceTotal, ExpenseRepository};
pub use schema::{initialize_schema, EXPENSE_TABLE};

use rusqlite::Connection;

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::ExpensePaths;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

/// Owner of the database connection and the audit trail
pub struct Storage {
    conn: Connection,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Open (creating if needed) the database under the configured directory
    pub fn open(paths: &ExpensePaths) -> ExpenseResult<Self> {
        paths.ensure_directories()?;

        let db_path = paths.database_file();
        let conn = Connection::open(&db_path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to open {}: {}", db_path.display(), e))
        })?;
        initialize_schema(&conn)?;

        tracing::debug!(path = %db_path.display(), "opened expense database");

        Ok(Self {
            conn,
            audit: Some(AuditLogger::new(paths.audit_log())),
        })
    }

    /// Open a throwaway in-memory database without an audit trail
    pub fn open_in_memory() -> ExpenseResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn, audit: None })
    }

    /// Repository over the expense table
    pub fn expenses(&self) -> ExpenseRepository<'_> {
        ExpenseRepository::new(&self.conn)
    }

    /// The audit logger, when this store keeps one
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Record a created expense in the audit trail
    pub fn log_create(&self, expense: &Expense) -> ExpenseResult<()> {
        self.log(&AuditEntry::create(expense))
    }

    /// Record an updated expense in the audit trail
    pub fn log_update(
        &self,
        before: &Expense,
        after: &Expense,
        changes: Option<String>,
    ) -> ExpenseResult<()> {
        self.log(&AuditEntry::update(before, after, changes))
    }

    /// Record a deleted expense in the audit trail
    pub fn log_delete(&self, expense: &Expense) -> ExpenseResult<()> {
        self.log(&AuditEntry::delete(expense))
    }

    fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        match &self.audit {
            Some(logger) => logger.log(entry),
            None => Ok(()),
        }
    }

    /// Close the connection, reporting any error the database raises
    pub fn close(self) -> ExpenseResult<()> {
        self.conn
            .close()
            .map_err(|(_, e)| ExpenseError::Storage(format!("Failed to close database: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn coffee() -> Expense {
        Expense::new(
            "Coffee",
            Money::from_cents(450),
            2,
            "food",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().join("data"));
        let storage = Storage::open(&paths).unwrap();

        assert!(paths.database_file().exists());
        assert!(storage.audit().is_some());
        assert_eq!(storage.expenses().count().unwrap(), 0);
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::open(&paths).unwrap();
        storage.expenses().insert(&coffee()).unwrap();
        storage.close().unwrap();

        let reopened = Storage::open(&paths).unwrap();
        let all = reopened.expenses().get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Coffee");
    }

    #[test]
    fn test_in_memory_has_no_audit_trail() {
        let storage = Storage::open_in_memory().unwrap();
        assert!(storage.audit().is_none());
        storage.log_create(&coffee()).unwrap();
    }
}
