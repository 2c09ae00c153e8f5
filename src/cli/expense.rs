//! Expense CLI commands
//!
//! Implements the one-shot commands for recording and editing expenses.

use clap::Args;

use crate::audit::describe_changes;
use crate::display::{format_expense_choice, format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{parse_date, Category, Expense, ExpenseChanges, ExpenseId, Money};
use crate::services::{DeleteOutcome, ExpenseFilter, ExpenseService, UpdateOutcome};
use crate::storage::Storage;

/// Arguments for `add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// What was bought
    pub name: String,

    /// Price per unit (e.g., "4.50")
    pub price: String,

    /// Number of units bought
    pub amount: i64,

    /// Category (food, clothing, entertainment, rent, utilities,
    /// transportation, other); anything else is stored as "other"
    pub category: String,

    /// Date of the expense (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Arguments for `list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only show this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for `show`
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Expense ID
    pub id: ExpenseId,
}

/// Arguments for `update`
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Expense ID
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub id: Option<ExpenseId>,

    /// Select the expense by name instead of ID
    #[arg(short, long)]
    pub name: Option<String>,

    /// New price per unit
    #[arg(long)]
    pub price: Option<String>,

    /// New number of units
    #[arg(long)]
    pub amount: Option<i64>,

    /// New category
    #[arg(long)]
    pub category: Option<String>,

    /// New date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
}

/// Arguments for `delete`
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Expense ID
    #[arg(required_unless_present = "name", conflicts_with = "name")]
    pub id: Option<ExpenseId>,

    /// Delete by name instead of ID
    #[arg(short, long)]
    pub name: Option<String>,

    /// Delete every expense with this name
    #[arg(long, requires = "name")]
    pub all: bool,
}

/// Record a new expense
pub fn handle_add(storage: &Storage, args: AddArgs) -> ExpenseResult<()> {
    let price = Money::parse(&args.price)?;
    let date = match args.date {
        Some(date) => parse_date(&date)?,
        None => chrono::Local::now().date_naive(),
    };

    let expense = Expense::new(args.name, price, args.amount, &args.category, date)?;
    let added = ExpenseService::new(storage).add(expense)?;

    println!("Expense added successfully.");
    print!("{}", format_expense_details(&added));

    Ok(())
}

/// List expenses, optionally filtered
pub fn handle_list(storage: &Storage, args: ListArgs) -> ExpenseResult<()> {
    let mut filter = ExpenseFilter::new();
    if let Some(category) = args.category {
        filter = filter.category(parse_category(&category)?);
    }
    if let Some(from) = args.from {
        filter = filter.since(parse_date(&from)?);
    }
    if let Some(to) = args.to {
        filter = filter.until(parse_date(&to)?);
    }

    let expenses = ExpenseService::new(storage).list(&filter)?;
    println!("{}", format_expense_table(&expenses));

    if !expenses.is_empty() {
        let total: Money = expenses.iter().map(|e| e.price).sum();
        println!();
        println!("{} expense(s), total {}", expenses.len(), total);
    }

    Ok(())
}

/// Show one expense
pub fn handle_show(storage: &Storage, args: ShowArgs) -> ExpenseResult<()> {
    let expense = ExpenseService::new(storage).require(args.id)?;
    print!("{}", format_expense_details(&expense));
    Ok(())
}

/// Edit an expense by id or by name
pub fn handle_update(storage: &Storage, args: UpdateArgs) -> ExpenseResult<()> {
    let changes = ExpenseChanges {
        price: args.price.as_deref().map(Money::parse).transpose()?,
        amount: args.amount,
        category: args.category.as_deref().map(Category::normalize),
        date: args.date.as_deref().map(parse_date).transpose()?,
    };
    if changes.is_empty() {
        return Err(ExpenseError::Validation(
            "Nothing to update: pass at least one of --price, --amount, --category or --date"
                .into(),
        ));
    }

    let service = ExpenseService::new(storage);
    let (outcome, target) = match (args.id, args.name) {
        (Some(id), _) => (service.update(id, &changes)?, format!("ID '{}'", id)),
        (None, Some(name)) => (
            report_ambiguity(&service, service.update_by_name(&name, &changes))?,
            format!("the name '{}'", name),
        ),
        (None, None) => {
            return Err(ExpenseError::InvalidArgument(
                "Pass an expense ID or --name".into(),
            ))
        }
    };

    match outcome {
        UpdateOutcome::Updated { before, after } => {
            println!("Expense '{}' updated successfully.", after.name);
            if let Some(diff) = describe_changes(&before, &after) {
                println!("  {}", diff);
            }
        }
        UpdateOutcome::NotFound => println!("No expense found with {}.", target),
    }

    Ok(())
}

/// Delete an expense by id or by name
pub fn handle_delete(storage: &Storage, args: DeleteArgs) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);

    let (outcome, target) = match (args.id, args.name) {
        (Some(id), _) => (service.delete(id)?, format!("ID '{}'", id)),
        (None, Some(name)) => (
            report_ambiguity(&service, service.delete_by_name(&name, args.all))?,
            format!("the name '{}'", name),
        ),
        (None, None) => {
            return Err(ExpenseError::InvalidArgument(
                "Pass an expense ID or --name".into(),
            ))
        }
    };

    match outcome {
        DeleteOutcome::Deleted(removed) => {
            for expense in &removed {
                println!("Expense '{}' deleted successfully.", expense.name);
            }
        }
        DeleteOutcome::NotFound => println!("No expense found with {}.", target),
    }

    Ok(())
}

/// Print the running total of all prices
pub fn handle_total(storage: &Storage) -> ExpenseResult<()> {
    let total = ExpenseService::new(storage).total()?;
    println!("Total spent: {}", total);
    Ok(())
}

/// Strict category lookup for filters, where "other" must be asked for explicitly
fn parse_category(input: &str) -> ExpenseResult<Category> {
    Category::recognize(input).ok_or_else(|| {
        ExpenseError::Validation(format!(
            "Unknown category '{}'. Choose one of: {}",
            input,
            Category::choices()
        ))
    })
}

/// List the candidates before passing an ambiguous-name error on
fn report_ambiguity<T>(service: &ExpenseService<'_>, result: ExpenseResult<T>) -> ExpenseResult<T> {
    if let Err(ExpenseError::AmbiguousName { name, .. }) = &result {
        eprintln!("Several expenses are named '{}':", name);
        for expense in service.find_by_name(name)? {
            eprintln!("  {}", format_expense_choice(&expense));
        }
        eprintln!("Pass the ID instead, or --all to delete every one of them.");
    }
    result
}
