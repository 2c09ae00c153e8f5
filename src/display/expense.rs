//! Expense display formatting
//!
//! Formats expenses for terminal output in table and detail views.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{format_date, Expense, Money};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: Money,
    #[tabled(rename = "Amount")]
    amount: i64,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Date")]
    date: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id.map(|id| id.to_string()).unwrap_or_default(),
            name: expense.name.clone(),
            price: expense.price,
            amount: expense.amount,
            category: expense.category.to_string(),
            date: format_date(expense.date),
        }
    }
}

/// Format a list of expenses as a table
pub fn format_expense_table(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut table = Table::new(expenses.iter().map(ExpenseRow::from));
    table.with(Style::psql());
    table.to_string()
}

/// One-line summary used when the user must pick between expenses
pub fn format_expense_choice(expense: &Expense) -> String {
    let id = expense
        .id
        .map(|id| format!("#{}", id))
        .unwrap_or_else(|| "#?".to_string());
    format!(
        "{:>5}  {}  {} x {}  {}",
        id,
        format_date(expense.date),
        expense.price,
        expense.amount,
        expense.category
    )
}

/// Format a single expense's details
pub fn format_expense_details(expense: &Expense) -> String {
    let mut output = String::new();

    if let Some(id) = expense.id {
        output.push_str(&format!("Expense:  #{}\n", id));
    }
    output.push_str(&format!("Name:     {}\n", expense.name));
    output.push_str(&format!("Price:    {}\n", expense.price));
    output.push_str(&format!("Amount:   {}\n", expense.amount));
    match expense.line_total() {
        Some(total) => output.push_str(&format!("Total:    {}\n", total)),
        None => output.push_str("Total:    too large to show\n"),
    }
    output.push_str(&format!("Category: {}\n", expense.category));
    output.push_str(&format!("Date:     {}\n", format_date(expense.date)));

    output
}
