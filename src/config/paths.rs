//! Path management for the expense tracker
//!
//! Resolves where the database and audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `--data-dir` flag or `EXPENSE_TRACKER_DATA_DIR` environment variable
//! 2. Platform data directory (`~/.local/share/expense-tracker` on Linux,
//!    `~/Library/Application Support/expense-tracker` on macOS,
//!    `%APPDATA%\expense-tracker\data` on Windows)
//! 3. The current working directory

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ExpenseError;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "EXPENSE_TRACKER_DATA_DIR";

/// Fixed name of the database file
pub const DATABASE_FILE_NAME: &str = "expense_tracker.db";

/// Manages all paths used by the expense tracker
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Directory holding the database and the audit log
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Resolve paths, honouring an explicit override first
    pub fn resolve(override_dir: Option<PathBuf>) -> Self {
        let base_dir = override_dir
            .or_else(|| std::env::var_os(DATA_DIR_ENV).map(PathBuf::from))
            .unwrap_or_else(resolve_default_path);

        Self { base_dir }
    }

    /// Create ExpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the SQLite database
    pub fn database_file(&self) -> PathBuf {
        self.base_dir.join(DATABASE_FILE_NAME)
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), ExpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ExpenseError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Check whether a database has been created here yet
    pub fn is_initialized(&self) -> bool {
        self.database_file().exists()
    }
}

fn resolve_default_path() -> PathBuf {
    ProjectDirs::from("", "", "expense-tracker")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(
            paths.database_file(),
            temp_dir.path().join("expense_tracker.db")
        );
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_explicit_override_wins() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::resolve(Some(temp_dir.path().to_path_buf()));
        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("data");
        let paths = ExpensePaths::with_base_dir(nested.clone());

        assert!(!paths.is_initialized());
        paths.ensure_directories().unwrap();
        assert!(nested.exists());
    }
}
