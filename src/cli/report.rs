//! CLI commands for reports
//!
//! Monthly unit report and the category spending summary.

use chrono::Datelike;
use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, ReportMonth};
use crate::reports::{MonthlyReport, SpendingSummary};
use crate::storage::Storage;

/// Arguments for `report`
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Month to report on (e.g., "2024-01"), defaults to the current month
    pub month: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `summary`
#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// First date to include (YYYY-MM-DD)
    #[arg(long, requires = "to", conflicts_with = "year")]
    pub from: Option<String>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long, requires = "from", conflicts_with = "year")]
    pub to: Option<String>,

    /// Calendar year, defaults to the current year
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the monthly report
pub fn handle_report(storage: &Storage, args: ReportArgs) -> ExpenseResult<()> {
    let month = match args.month {
        Some(month) => ReportMonth::parse(&month)?,
        None => ReportMonth::current(),
    };

    let report = MonthlyReport::generate(storage, month)?;

    if let Some(path) = args.output {
        let mut writer = create_output(&path)?;
        report.export_csv(&mut writer)?;
        writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        println!("Monthly report exported to: {}", path.display());
    } else {
        print!("{}", report.format_terminal());
    }

    Ok(())
}

/// Handle the spending summary
pub fn handle_summary(storage: &Storage, args: SummaryArgs) -> ExpenseResult<()> {
    let summary = match (args.from, args.to) {
        (Some(from), Some(to)) => {
            SpendingSummary::generate(storage, parse_date(&from)?, parse_date(&to)?)?
        }
        _ => {
            let year = args
                .year
                .unwrap_or_else(|| chrono::Local::now().date_naive().year());
            SpendingSummary::for_year(storage, year)?
        }
    };

    if let Some(path) = args.output {
        let mut writer = create_output(&path)?;
        summary.export_csv(&mut writer)?;
        writer
            .flush()
            .map_err(|e| ExpenseError::Export(e.to_string()))?;
        println!("Spending summary exported to: {}", path.display());
    } else {
        print!("{}", summary.format_terminal());
    }

    Ok(())
}

pub(crate) fn create_output(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
