//! Service layer for the expense tracker
//!
//! The service layer sits on top of the storage layer: it resolves name
//! lookups, turns row counts into outcomes and writes the audit trail.

pub mod expense;

pub use expense::{DeleteOutcome, ExpenseFilter, ExpenseService, UpdateOutcome};
