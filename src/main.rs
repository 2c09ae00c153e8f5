use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use expense_tracker::cli::{
    handle_add, handle_delete, handle_export, handle_history, handle_list, handle_report,
    handle_show, handle_summary, handle_total, handle_update, run_shell, AddArgs, DeleteArgs,
    ExportArgs, HistoryArgs, ListArgs, ReportArgs, ShowArgs, SummaryArgs, UpdateArgs,
};
use expense_tracker::config::{ExpensePaths, DATA_DIR_ENV};
use expense_tracker::storage::Storage;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Personal expense tracker backed by SQLite",
    long_about = "Record what you buy, how much it cost and how many units you bought, \
                  then see where it went: monthly breakdowns by category, yearly \
                  averages and spending summaries. Run without a command for the \
                  interactive menu."
)]
struct Cli {
    /// Directory holding the database and audit log
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record a new expense
    Add(AddArgs),

    /// List expenses
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one expense
    Show(ShowArgs),

    /// Change an expense's price, amount, category or date
    Update(UpdateArgs),

    /// Delete an expense
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Show the total of all prices
    Total,

    /// Monthly report of units bought per category
    Report(ReportArgs),

    /// Money spent per category over a date range or year
    Summary(SummaryArgs),

    /// Export all expenses
    Export(ExportArgs),

    /// Show recent changes from the audit log
    History(HistoryArgs),

    /// Show current configuration and paths
    Config,

    /// Launch the interactive menu
    Shell,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    expense_tracker::logging::init(cli.verbose);

    let paths = ExpensePaths::resolve(cli.data_dir);

    if let Some(Commands::Config) = cli.command {
        println!("Expense Tracker Configuration");
        println!("=============================");
        println!("Data directory: {}", paths.base_dir().display());
        println!("Database:       {}", paths.database_file().display());
        println!("Audit log:      {}", paths.audit_log().display());
        println!(
            "Initialized:    {}",
            if paths.is_initialized() { "yes" } else { "no" }
        );
        return Ok(());
    }

    let storage = Storage::open(&paths)?;

    let result = match cli.command {
        Some(Commands::Add(args)) => handle_add(&storage, args),
        Some(Commands::List(args)) => handle_list(&storage, args),
        Some(Commands::Show(args)) => handle_show(&storage, args),
        Some(Commands::Update(args)) => handle_update(&storage, args),
        Some(Commands::Delete(args)) => handle_delete(&storage, args),
        Some(Commands::Total) => handle_total(&storage),
        Some(Commands::Report(args)) => handle_report(&storage, args),
        Some(Commands::Summary(args)) => handle_summary(&storage, args),
        Some(Commands::Export(args)) => handle_export(&storage, args),
        Some(Commands::History(args)) => handle_history(&storage, args),
        Some(Commands::Shell) | None => run_shell(&storage),
        Some(Commands::Config) => Ok(()),
    };

    // Closed on every path, including failed commands.
    let closed = storage.close();
    result?;
    closed?;

    Ok(())
}
