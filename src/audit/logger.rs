//! JSONL audit log next to the database
//!
//! One entry per line. A line that fails to parse (for instance one cut short
//! by a crash mid-append) is skipped with a warning so the rest of the history
//! stays readable.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseId;

use super::entry::AuditEntry;

/// Appends to and reads back the audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry as a single write of `json + '\n'`
    pub fn log(&self, entry: &AuditEntry) -> ExpenseResult<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .and_then(|mut file| file.write_all(&line))
            .map_err(|e| {
                ExpenseError::Io(format!(
                    "Cannot append to audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })
    }

    /// Every readable entry, oldest first
    pub fn read_all(&self) -> ExpenseResult<Vec<AuditEntry>> {
        let contents = match fs::read_to_string(&self.log_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(ExpenseError::Io(format!(
                    "Cannot read audit log {}: {}",
                    self.log_path.display(),
                    e
                )))
            }
        };

        let entries = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(line = idx + 1, error = %e, "skipping unreadable audit entry");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(count);
        Ok(entries.split_off(start))
    }

    /// The full history of one expense, oldest first
    pub fn for_expense(&self, id: ExpenseId) -> ExpenseResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        entries.retain(|entry| entry.expense_id == id.get());
        Ok(entries)
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::entry::Operation;
    use crate::models::{Expense, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_logger() -> (AuditLogger, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        (logger, temp_dir)
    }

    fn expense(id: i64) -> Expense {
        Expense::new(
            format!("Item {}", id),
            Money::from_cents(100),
            1,
            "other",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .unwrap()
        .with_id(ExpenseId::new(id))
    }

    #[test]
    fn test_log_and_read() {
        let (logger, _temp) = create_test_logger();
        logger.log(&AuditEntry::create(&expense(1))).unwrap();

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Create);
        assert_eq!(entries[0].expense_id, 1);
    }

    #[test]
    fn test_read_recent() {
        let (logger, _temp) = create_test_logger();
        for id in 0..10 {
            logger.log(&AuditEntry::create(&expense(id))).unwrap();
        }

        let recent = logger.read_recent(3).unwrap();
        let ids: Vec<_> = recent.iter().map(|e| e.expense_id).collect();
        assert_eq!(ids, vec![7, 8, 9]);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let (logger, _temp) = create_test_logger();
        assert!(logger.read_all().unwrap().is_empty());
        assert!(logger.read_recent(5).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_line_is_skipped() {
        let (logger, _temp) = create_test_logger();
        logger.log(&AuditEntry::create(&expense(1))).unwrap();
        fs::OpenOptions::new()
            .append(true)
            .open(logger.path())
            .unwrap()
            .write_all(b"{\"timestamp\":\"2024-01-0\n")
            .unwrap();
        logger.log(&AuditEntry::delete(&expense(1))).unwrap();

        let operations: Vec<_> = logger
            .read_all()
            .unwrap()
            .iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(operations, vec![Operation::Create, Operation::Delete]);
    }

    #[test]
    fn test_for_expense() {
        let (logger, _temp) = create_test_logger();
        logger.log(&AuditEntry::create(&expense(1))).unwrap();
        logger.log(&AuditEntry::create(&expense(2))).unwrap();
        logger.log(&AuditEntry::delete(&expense(1))).unwrap();

        let history = logger.for_expense(ExpenseId::new(1)).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].operation, Operation::Delete);
        assert!(logger.for_expense(ExpenseId::new(3)).unwrap().is_empty());
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let (logger, temp) = create_test_logger();
        fs::create_dir(temp.path().join("audit.log")).unwrap();
        assert!(logger.log(&AuditEntry::create(&expense(1))).is_err());
    }
}
