//! Interactive menu shell
//!
//! Runs the numbered menu until the user exits or views a monthly report.
//! A failing action is reported and the menu is shown again.

use std::io::{self, BufRead, Write};

use crate::display::{format_expense_choice, format_expense_table};
use crate::error::ExpenseResult;
use crate::models::{Category, Expense, ExpenseChanges};
use crate::reports::MonthlyReport;
use crate::services::{DeleteOutcome, ExpenseService, UpdateOutcome};
use crate::storage::Storage;

use super::prompt::Prompter;

const MENU: &str = "\
Expense Tracker Menu:
1. Add Expense
2. Delete Expense
3. Update Expense
4. View All Expenses
5. View Monthly Report
6. Exit";

enum Flow {
    Continue,
    Exit,
}

/// Run the shell on stdin and stdout
pub fn run_shell(storage: &Storage) -> ExpenseResult<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(storage, stdin.lock(), stdout.lock()).run()
}

/// The menu loop over any input and output
pub struct Shell<'a, R, W> {
    storage: &'a Storage,
    prompt: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(storage: &'a Storage, input: R, output: W) -> Self {
        Self {
            storage,
            prompt: Prompter::new(input, output),
        }
    }

    /// Give back the writer once the shell has finished
    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Show the menu until the user leaves or the input closes
    pub fn run(&mut self) -> ExpenseResult<()> {
        loop {
            self.prompt.say(MENU)?;
            let Some(choice) = self.prompt.number("Enter your choice: ")? else {
                return Ok(());
            };

            let result = match choice {
                1 => self.add_expense(),
                2 => self.delete_expense(),
                3 => self.update_expense(),
                4 => self.view_all_expenses(),
                5 => self.view_monthly_report(),
                6 => {
                    self.prompt.say("Exiting...")?;
                    Ok(Flow::Exit)
                }
                _ => {
                    self.prompt.say("Invalid choice. Please try again.")?;
                    Ok(Flow::Continue)
                }
            };

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(e) => {
                    tracing::warn!(error = %e, "shell action failed");
                    self.prompt.say(format!("Error: {}", e))?;
                }
            }
        }
    }

    fn service(&self) -> ExpenseService<'a> {
        ExpenseService::new(self.storage)
    }

    fn add_expense(&mut self) -> ExpenseResult<Flow> {
        let Some(name) = self.prompt.text("Enter your expense name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(price) = self.prompt.price("Enter the cost price: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(amount) = self
            .prompt
            .number("Enter how many units were bought: ")?
        else {
            return Ok(Flow::Exit);
        };
        let Some(category) = self.ask_category()? else {
            return Ok(Flow::Exit);
        };
        let Some(date) = self
            .prompt
            .date("Enter the date of the expense (YYYY-MM-DD): ")?
        else {
            return Ok(Flow::Exit);
        };

        let expense = Expense::new(name, price, amount, category.as_str(), date)?;
        self.service().add(expense)?;
        self.prompt.say("Expense added successfully.")?;
        Ok(Flow::Continue)
    }

    fn delete_expense(&mut self) -> ExpenseResult<Flow> {
        let Some(name) = self.prompt.text("Enter expense name to delete: ")? else {
            return Ok(Flow::Exit);
        };

        let service = self.service();
        let matches = service.find_by_name(&name)?;

        let outcome = match matches.as_slice() {
            [] => DeleteOutcome::NotFound,
            [only] => match only.id {
                Some(id) => service.delete(id)?,
                None => DeleteOutcome::NotFound,
            },
            several => {
                self.prompt
                    .say(format!("Several expenses are named '{}':", name))?;
                for (idx, expense) in several.iter().enumerate() {
                    self.prompt
                        .say(format!("{}. {}", idx + 1, format_expense_choice(expense)))?;
                }
                let Some(pick) = self.prompt.choice(
                    "Enter the number of the expense to delete (0 deletes all): ",
                    0..=several.len(),
                )?
                else {
                    return Ok(Flow::Exit);
                };
                match pick {
                    0 => service.delete_by_name(&name, true)?,
                    n => match several[n - 1].id {
                        Some(id) => service.delete(id)?,
                        None => DeleteOutcome::NotFound,
                    },
                }
            }
        };

        match outcome {
            DeleteOutcome::NotFound => self
                .prompt
                .say(format!("No expense found with the name '{}'.", name))?,
            DeleteOutcome::Deleted(_) => self
                .prompt
                .say(format!("Expense '{}' deleted successfully.", name))?,
        }
        Ok(Flow::Continue)
    }

    fn update_expense(&mut self) -> ExpenseResult<Flow> {
        let expenses = self.service().list_all()?;
        if expenses.is_empty() {
            self.prompt.say("No expenses found.")?;
            return Ok(Flow::Continue);
        }

        self.prompt.say("Select the expense to update:")?;
        for (idx, expense) in expenses.iter().enumerate() {
            self.prompt.say(format!(
                "{}. {} ({})",
                idx + 1,
                expense.name,
                format_expense_choice(expense).trim()
            ))?;
        }
        let Some(pick) = self.prompt.choice(
            "Enter the number corresponding to the expense: ",
            1..=expenses.len(),
        )?
        else {
            return Ok(Flow::Exit);
        };
        let target = &expenses[pick - 1];

        self.prompt.say(
            "Select what you want to update:\n1. Price\n2. Amount\n3. Category\n4. Date\n5. Update all",
        )?;
        let Some(field) = self.prompt.choice("Enter your choice: ", 1..=5)? else {
            return Ok(Flow::Exit);
        };

        let Some(changes) = self.ask_changes(field)? else {
            return Ok(Flow::Exit);
        };

        let Some(id) = target.id else {
            return Ok(Flow::Continue);
        };
        match self.service().update(id, &changes)? {
            UpdateOutcome::Updated { .. } => self.prompt.say("Expense updated successfully.")?,
            UpdateOutcome::NotFound => self
                .prompt
                .say(format!("No expense found with the name '{}'.", target.name))?,
        }
        Ok(Flow::Continue)
    }

    fn ask_changes(&mut self, field: usize) -> ExpenseResult<Option<ExpenseChanges>> {
        let mut changes = ExpenseChanges::default();

        if field == 1 || field == 5 {
            let Some(price) = self.prompt.price("Enter new expense price: ")? else {
                return Ok(None);
            };
            changes.price = Some(price);
        }
        if field == 2 || field == 5 {
            let Some(amount) = self.prompt.number("Enter new expense amount: ")? else {
                return Ok(None);
            };
            changes.amount = Some(amount);
        }
        if field == 3 || field == 5 {
            let Some(category) = self.ask_category()? else {
                return Ok(None);
            };
            changes.category = Some(category);
        }
        if field == 4 || field == 5 {
            let Some(date) = self.prompt.date("Enter new expense date (YYYY-MM-DD): ")? else {
                return Ok(None);
            };
            changes.date = Some(date);
        }

        Ok(Some(changes))
    }

    fn ask_category(&mut self) -> ExpenseResult<Option<Category>> {
        let message = format!("Choose a category from these: {}: ", Category::choices());
        self.prompt.category(&message)
    }

    fn view_all_expenses(&mut self) -> ExpenseResult<Flow> {
        let expenses = self.service().list_all()?;
        self.prompt.say(format_expense_table(&expenses))?;
        Ok(Flow::Continue)
    }

    fn view_monthly_report(&mut self) -> ExpenseResult<Flow> {
        let Some(month) = self
            .prompt
            .month("Enter the year and month (YYYY-MM) to view expenses for: ")?
        else {
            return Ok(Flow::Exit);
        };

        let report = MonthlyReport::generate(self.storage, month)?;
        self.prompt.say(report.format_terminal())?;
        self.prompt.say("Exiting...")?;
        Ok(Flow::Exit)
    }
}
