//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod history;
pub mod prompt;
pub mod report;
pub mod shell;

pub use expense::{
    handle_add, handle_delete, handle_list, handle_show, handle_total, handle_update, AddArgs,
    DeleteArgs, ListArgs, ShowArgs, UpdateArgs,
};
pub use export::{handle_export, ExportArgs, ExportFormat};
pub use history::{handle_history, HistoryArgs};
pub use report::{handle_report, handle_summary, ReportArgs, SummaryArgs};
pub use shell::{run_shell, Shell};
