//! CLI command for the audit history

use clap::Args;

use crate::error::ExpenseResult;
use crate::models::ExpenseId;
use crate::storage::Storage;

/// Arguments for `history`
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Only show changes to this expense
    #[arg(long)]
    pub id: Option<ExpenseId>,

    /// Number of entries to show
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

/// Show the most recent audited changes, oldest first
pub fn handle_history(storage: &Storage, args: HistoryArgs) -> ExpenseResult<()> {
    let Some(audit) = storage.audit() else {
        println!("No audit log is kept for this database.");
        return Ok(());
    };

    let entries = match args.id {
        Some(id) => {
            let mut entries = audit.for_expense(id)?;
            let start = entries.len().saturating_sub(args.limit);
            entries.split_off(start)
        }
        None => audit.read_recent(args.limit)?,
    };
    if entries.is_empty() {
        println!("No history recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
