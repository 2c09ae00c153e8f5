//! Line-oriented prompts for the interactive shell
//!
//! Every prompt keeps asking until the answer parses. `Ok(None)` means the
//! input was closed before a valid answer arrived.

use std::fmt;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

use crate::error::ExpenseResult;
use crate::models::{parse_date, Category, Money, ReportMonth};

/// Prompts over any buffered reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line
    pub fn say(&mut self, message: impl fmt::Display) -> ExpenseResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Give back the writer, e.g. to inspect what was printed
    pub fn into_output(self) -> W {
        self.output
    }

    /// Any non-empty text
    pub fn text(&mut self, message: &str) -> ExpenseResult<Option<String>> {
        self.ask(message, "Input cannot be empty. Please try again.", |s| {
            (!s.is_empty()).then(|| s.to_string())
        })
    }

    /// A non-negative whole number
    pub fn number(&mut self, message: &str) -> ExpenseResult<Option<i64>> {
        self.ask(message, "Please enter a number", |s| {
            s.parse::<i64>().ok().filter(|n| *n >= 0)
        })
    }

    /// A non-negative price such as `4.50`
    pub fn price(&mut self, message: &str) -> ExpenseResult<Option<Money>> {
        self.ask(message, "Please enter a price such as 4.50", |s| {
            Money::parse(s).ok().filter(|m| !m.is_negative())
        })
    }

    /// One of the fixed categories, matched case-insensitively
    pub fn category(&mut self, message: &str) -> ExpenseResult<Option<Category>> {
        let complaint = format!(
            "Invalid input. Please enter one of the following: {}",
            Category::choices()
        );
        self.ask(message, &complaint, Category::recognize)
    }

    /// A calendar date as `YYYY-MM-DD`
    pub fn date(&mut self, message: &str) -> ExpenseResult<Option<chrono::NaiveDate>> {
        self.ask(
            message,
            "Invalid date format. Please enter the date in YYYY-MM-DD format.",
            |s| parse_date(s).ok(),
        )
    }

    /// A month as `YYYY-MM`
    pub fn month(&mut self, message: &str) -> ExpenseResult<Option<ReportMonth>> {
        self.ask(
            message,
            "Invalid input format. Please enter the year and month in YYYY-MM format.",
            |s| ReportMonth::parse(s).ok(),
        )
    }

    /// A number picked from a numbered list
    pub fn choice(
        &mut self,
        message: &str,
        range: RangeInclusive<usize>,
    ) -> ExpenseResult<Option<usize>> {
        self.ask(message, "Invalid choice. Please enter a valid number.", |s| {
            s.parse::<usize>().ok().filter(|n| range.contains(n))
        })
    }

    fn ask<T>(
        &mut self,
        message: &str,
        complaint: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> ExpenseResult<Option<T>> {
        loop {
            let Some(line) = self.read_line(message)? else {
                return Ok(None);
            };
            if let Some(value) = parse(&line) {
                return Ok(Some(value));
            }
            self.say(complaint)?;
        }
    }

    fn read_line(&mut self, message: &str) -> ExpenseResult<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
