//! Expense service
//!
//! Business logic for recording, editing and removing expenses. Every
//! mutation is committed by the repository before the audit entry is
//! written, and name-based lookups are disambiguated here rather than in
//! the store.

use chrono::NaiveDate;

use crate::audit::describe_changes;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseChanges, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering listed expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<Category>,
    /// Inclusive start date
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn since(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }
}

/// Result of an update that may not have matched any row
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    Updated { before: Expense, after: Expense },
    NotFound,
}

impl UpdateOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result of a delete that may not have matched any row
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome {
    /// The rows that were removed
    Deleted(Vec<Expense>),
    NotFound,
}

impl DeleteOutcome {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Number of rows removed
    pub fn removed(&self) -> usize {
        match self {
            Self::Deleted(expenses) => expenses.len(),
            Self::NotFound => 0,
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense and return it with its assigned id
    pub fn add(&self, expense: Expense) -> ExpenseResult<Expense> {
        let id = self.storage.expenses().insert(&expense)?;
        let expense = expense.with_id(id);

        record_audit(self.storage.log_create(&expense), "create", id);
        tracing::info!(%id, name = %expense.name, "expense added");

        Ok(expense)
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses().get(id)
    }

    /// Get an expense by id, failing when it does not exist
    pub fn require(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        self.get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(format!("#{}", id)))
    }

    /// Every expense with exactly this name, oldest first
    pub fn find_by_name(&self, name: &str) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses().find_by_name(name)
    }

    /// All expenses in insertion order
    pub fn list_all(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses().get_all()
    }

    /// List expenses with optional filtering
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let repo = self.storage.expenses();
        let mut expenses = match (filter.category, filter.start_date, filter.end_date) {
            (Some(category), _, _) => repo.get_by_category(category)?,
            (None, Some(start), Some(end)) => repo.get_by_date_range(start, end)?,
            _ => repo.get_all()?,
        };

        if let Some(start) = filter.start_date {
            expenses.retain(|e| e.date >= start);
        }
        if let Some(end) = filter.end_date {
            expenses.retain(|e| e.date <= end);
        }

        Ok(expenses)
    }

    /// Sum of prices across every expense
    pub fn total(&self) -> ExpenseResult<Money> {
        self.storage.expenses().total_price()
    }

    /// Number of stored expenses
    pub fn count(&self) -> ExpenseResult<usize> {
        self.storage.expenses().count()
    }

    /// Apply a partial edit to one expense
    pub fn update(&self, id: ExpenseId, changes: &ExpenseChanges) -> ExpenseResult<UpdateOutcome> {
        let Some(before) = self.get(id)? else {
            tracing::debug!(%id, "update target not found");
            return Ok(UpdateOutcome::NotFound);
        };

        let mut after = before.clone();
        changes.apply_to(&mut after);

        let changed = self.storage.expenses().update(id, &after)?;
        if changed == 0 {
            return Ok(UpdateOutcome::NotFound);
        }

        record_audit(
            self.storage
                .log_update(&before, &after, describe_changes(&before, &after)),
            "update",
            id,
        );
        tracing::info!(%id, name = %after.name, "expense updated");

        Ok(UpdateOutcome::Updated { before, after })
    }

    /// Overwrite price, amount, category and date of one expense from a record
    ///
    /// The stored name is kept.
    pub fn replace(&self, id: ExpenseId, record: &Expense) -> ExpenseResult<UpdateOutcome> {
        let changes = ExpenseChanges {
            price: Some(record.price),
            amount: Some(record.amount),
            category: Some(record.category),
            date: Some(record.date),
        };
        self.update(id, &changes)
    }

    /// Apply a partial edit to the single expense with this name
    ///
    /// Fails with [`ExpenseError::AmbiguousName`] when several rows share it.
    pub fn update_by_name(
        &self,
        name: &str,
        changes: &ExpenseChanges,
    ) -> ExpenseResult<UpdateOutcome> {
        match self.single_match(name)? {
            Some(expense) => match expense.id {
                Some(id) => self.update(id, changes),
                None => Ok(UpdateOutcome::NotFound),
            },
            None => Ok(UpdateOutcome::NotFound),
        }
    }

    /// Delete one expense by id
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<DeleteOutcome> {
        let Some(expense) = self.get(id)? else {
            tracing::debug!(%id, "delete target not found");
            return Ok(DeleteOutcome::NotFound);
        };

        if self.storage.expenses().delete(id)? == 0 {
            return Ok(DeleteOutcome::NotFound);
        }

        record_audit(self.storage.log_delete(&expense), "delete", id);
        tracing::info!(%id, name = %expense.name, "expense deleted");

        Ok(DeleteOutcome::Deleted(vec![expense]))
    }

    /// Delete the expense with this name
    ///
    /// When several rows share the name, `all` must be set to remove every
    /// one of them; otherwise the call fails with
    /// [`ExpenseError::AmbiguousName`] and nothing is removed.
    pub fn delete_by_name(&self, name: &str, all: bool) -> ExpenseResult<DeleteOutcome> {
        let matches = self.find_by_name(name)?;
        if matches.is_empty() {
            tracing::debug!(name, "delete target not found");
            return Ok(DeleteOutcome::NotFound);
        }
        if matches.len() > 1 && !all {
            return Err(ambiguous(name, &matches));
        }

        let removed = self.storage.expenses().delete_by_name(name)?;
        if removed == 0 {
            return Ok(DeleteOutcome::NotFound);
        }

        for expense in &matches {
            if let Some(id) = expense.id {
                record_audit(self.storage.log_delete(expense), "delete", id);
            }
        }
        tracing::info!(name, removed, "expenses deleted by name");

        Ok(DeleteOutcome::Deleted(matches))
    }

    fn single_match(&self, name: &str) -> ExpenseResult<Option<Expense>> {
        let mut matches = self.find_by_name(name)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(ambiguous(name, &matches)),
        }
    }
}

/// The write is already committed, so a failed audit append is only logged
fn record_audit(result: ExpenseResult<()>, operation: &str, id: ExpenseId) {
    if let Err(e) = result {
        tracing::warn!(error = %e, %id, operation, "audit log write failed");
    }
}

fn ambiguous(name: &str, matches: &[Expense]) -> ExpenseError {
    ExpenseError::AmbiguousName {
        name: name.to_string(),
        ids: matches.iter().filter_map(|e| e.id).map(|id| id.get()).collect(),
    }
}
