//! Audit trail for the expense tracker
//!
//! Every successful add, update and delete appends one entry to an
//! append-only log (one JSON object per line) stored next to the database.
//!
//! - `AuditEntry`: timestamp, operation, expense id/name and the expense as it
//!   was before and after the operation.
//! - `AuditLogger`: appends entries and reads them back.
//! - `describe_changes`: field-by-field summary of an update.

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
