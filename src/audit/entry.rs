//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Expense;

/// Types of operations that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    pub operation: Operation,

    /// Row id of the affected expense
    pub expense_id: i64,

    pub expense_name: String,

    /// The expense before the operation (updates and deletes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<Expense>,

    /// The expense after the operation (creates and updates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Expense>,

    /// Human-readable change summary for updates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl AuditEntry {
    fn base(operation: Operation, expense: &Expense) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            expense_id: expense.id.map(|id| id.get()).unwrap_or_default(),
            expense_name: expense.name.clone(),
            before: None,
            after: None,
            changes: None,
        }
    }

    /// Entry for a newly inserted expense
    pub fn create(expense: &Expense) -> Self {
        Self {
            after: Some(expense.clone()),
            ..Self::base(Operation::Create, expense)
        }
    }

    /// Entry for an updated expense
    pub fn update(before: &Expense, after: &Expense, changes: Option<String>) -> Self {
        Self {
            before: Some(before.clone()),
            after: Some(after.clone()),
            changes,
            ..Self::base(Operation::Update, after)
        }
    }

    /// Entry for a deleted expense
    pub fn delete(expense: &Expense) -> Self {
        Self {
            before: Some(expense.clone()),
            ..Self::base(Operation::Delete, expense)
        }
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {} expense #{} ({})",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.expense_id,
            self.expense_name
        );

        if let Some(changes) = &self.changes {
            output.push_str(&format!("\n  Changes: {}", changes));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, Money};
    use chrono::NaiveDate;

    fn stored_coffee() -> Expense {
        Expense::new(
            "Coffee",
            Money::from_cents(450),
            2,
            "food",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap()
        .with_id(ExpenseId::new(12))
    }

    #[test]
    fn test_create_entry() {
        let entry = AuditEntry::create(&stored_coffee());

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.expense_id, 12);
        assert_eq!(entry.expense_name, "Coffee");
        assert!(entry.before.is_none());
        assert!(entry.after.is_some());
    }

    #[test]
    fn test_delete_entry() {
        let entry = AuditEntry::delete(&stored_coffee());

        assert_eq!(entry.operation, Operation::Delete);
        assert!(entry.before.is_some());
        assert!(entry.after.is_none());
    }

    #[test]
    fn test_serialization_skips_empty_snapshots() {
        let entry = AuditEntry::create(&stored_coffee());
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"before\""));

        let deserialized: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.operation, Operation::Create);
        assert_eq!(deserialized.after.unwrap().name, "Coffee");
    }

    #[test]
    fn test_human_readable_format() {
        let before = stored_coffee();
        let mut after = before.clone();
        after.amount = 3;
        let entry = AuditEntry::update(&before, &after, Some("amount: 2 -> 3".into()));

        let formatted = entry.format_human_readable();
        assert!(formatted.contains("UPDATE expense #12 (Coffee)"));
        assert!(formatted.contains("Changes: amount: 2 -> 3"));
    }
}
