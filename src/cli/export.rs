//! CLI command for data export

use clap::{Args, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_expenses_csv, export_expenses_json};
use crate::storage::Storage;

use super::report::create_output;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV, one row per expense
    Csv,
    /// JSON with export metadata
    Json,
}

/// Arguments for `export`
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Output file path; standard output when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Handle the export command
pub fn handle_export(storage: &Storage, args: ExportArgs) -> ExpenseResult<()> {
    match &args.output {
        Some(path) => {
            let mut writer = create_output(path)?;
            write_export(storage, &args, &mut writer)?;
            writer
                .flush()
                .map_err(|e| ExpenseError::Export(e.to_string()))?;

            let count = storage.expenses().count()?;
            eprintln!("Exported {} expenses to: {}", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write_export(storage, &args, &mut writer)?;
            if matches!(args.format, ExportFormat::Json) {
                writeln!(writer)?;
            }
        }
    }

    Ok(())
}

fn write_export<W: Write>(storage: &Storage, args: &ExportArgs, writer: &mut W) -> ExpenseResult<()> {
    match args.format {
        ExportFormat::Csv => export_expenses_csv(storage, writer),
        ExportFormat::Json => export_expenses_json(storage, writer, args.pretty),
    }
}
