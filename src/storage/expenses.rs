//! Expense repository for SQLite storage
//!
//! Every statement runs in autocommit mode, so each insert, update and delete
//! is committed on its own as soon as it returns.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Params, Row};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{format_date, parse_date, Category, DateWindow, Expense, ExpenseId, Money};

const SELECT_COLUMNS: &str = "SELECT id, name, price, amount, category, date FROM expense_tracker";

/// Per-category money totals for a date range
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPriceTotal {
    pub category: Category,
    pub total: Money,
    pub count: usize,
}

/// Repository for expense persistence and aggregate queries
pub struct ExpenseRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ExpenseRepository<'a> {
    /// Create a repository over an open connection
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new row and return the id the database assigned
    pub fn insert(&self, expense: &Expense) -> ExpenseResult<ExpenseId> {
        expense
            .validate()
            .map_err(|e| ExpenseError::InvalidArgument(e.to_string()))?;

        self.conn.execute(
            "INSERT INTO expense_tracker (name, price, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                expense.name,
                expense.price.as_dollars(),
                expense.amount,
                expense.category.as_str(),
                format_date(expense.date),
            ],
        )?;

        let id = ExpenseId::new(self.conn.last_insert_rowid());
        tracing::debug!(%id, name = %expense.name, "inserted expense");
        Ok(id)
    }

    /// Overwrite price, amount, category and date of one row
    ///
    /// Returns the number of rows changed (0 when the id does not exist).
    pub fn update(&self, id: ExpenseId, expense: &Expense) -> ExpenseResult<usize> {
        expense
            .validate()
            .map_err(|e| ExpenseError::InvalidArgument(e.to_string()))?;

        let changed = self.conn.execute(
            "UPDATE expense_tracker SET price = ?1, amount = ?2, category = ?3, date = ?4
             WHERE id = ?5",
            params![
                expense.price.as_dollars(),
                expense.amount,
                expense.category.as_str(),
                format_date(expense.date),
                id.get(),
            ],
        )?;

        tracing::debug!(%id, changed, "updated expense");
        Ok(changed)
    }

    /// Delete one row, returning how many rows were removed
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM expense_tracker WHERE id = ?1", [id.get()])?;
        tracing::debug!(%id, removed, "deleted expense");
        Ok(removed)
    }

    /// Delete every row named `name`, returning how many rows were removed
    pub fn delete_by_name(&self, name: &str) -> ExpenseResult<usize> {
        let removed = self
            .conn
            .execute("DELETE FROM expense_tracker WHERE name = ?1", [name])?;
        tracing::debug!(name, removed, "deleted expenses by name");
        Ok(removed)
    }

    /// Get an expense by id
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        let sql = format!("{} WHERE id = ?1", SELECT_COLUMNS);
        let expense = self
            .conn
            .query_row(&sql, [id.get()], row_to_expense)
            .optional()?;
        Ok(expense)
    }

    /// Every row whose name matches exactly, in insertion order
    pub fn find_by_name(&self, name: &str) -> ExpenseResult<Vec<Expense>> {
        let sql = format!("{} WHERE name = ?1 ORDER BY id", SELECT_COLUMNS);
        self.query_expenses(&sql, [name])
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> ExpenseResult<Vec<Expense>> {
        let sql = format!("{} ORDER BY id", SELECT_COLUMNS);
        self.query_expenses(&sql, [])
    }

    /// Get expenses in one category
    pub fn get_by_category(&self, category: Category) -> ExpenseResult<Vec<Expense>> {
        let sql = format!("{} WHERE category = ?1 ORDER BY id", SELECT_COLUMNS);
        self.query_expenses(&sql, [category.as_str()])
    }

    /// Get expenses dated between `start` and `end`, both inclusive
    pub fn get_by_date_range(&self, start: NaiveDate, end: NaiveDate) -> ExpenseResult<Vec<Expense>> {
        let sql = format!("{} WHERE date BETWEEN ?1 AND ?2 ORDER BY id", SELECT_COLUMNS);
        self.query_expenses(&sql, params![format_date(start), format_date(end)])
    }

    /// Sum of `price` over every row; zero for an empty table
    pub fn total_price(&self) -> ExpenseResult<Money> {
        let total: Option<f64> =
            self.conn
                .query_row("SELECT SUM(price) FROM expense_tracker", [], |row| row.get(0))?;
        Ok(total.map(Money::from_dollars).unwrap_or_default())
    }

    /// Number of stored rows
    pub fn count(&self) -> ExpenseResult<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM expense_tracker", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Sum of `amount` over a half-open window; zero when nothing matches
    pub fn sum_amount(&self, window: DateWindow) -> ExpenseResult<i64> {
        let total: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expense_tracker WHERE date >= ?1 AND date < ?2",
            params![format_date(window.start), format_date(window.end)],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Sum of `amount` per category over a half-open window
    ///
    /// Only categories with at least one row in the window are returned.
    pub fn amount_by_category(&self, window: DateWindow) -> ExpenseResult<BTreeMap<Category, i64>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COALESCE(SUM(amount), 0) FROM expense_tracker
             WHERE date >= ?1 AND date < ?2
             GROUP BY category",
        )?;

        let rows = stmt
            .query_map(
                params![format_date(window.start), format_date(window.end)],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        let mut totals = BTreeMap::new();
        for (category, units) in rows {
            let slot = totals.entry(Category::normalize(&category)).or_insert(0i64);
            *slot = slot.saturating_add(units);
        }
        Ok(totals)
    }

    /// Sum of `price` and row count per category, dates inclusive
    pub fn price_by_category(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ExpenseResult<Vec<CategoryPriceTotal>> {
        let mut stmt = self.conn.prepare(
            "SELECT category, COALESCE(SUM(price), 0.0), COUNT(*) FROM expense_tracker
             WHERE date BETWEEN ?1 AND ?2
             GROUP BY category",
        )?;

        let rows = stmt
            .query_map(params![format_date(start), format_date(end)], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, f64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut totals: BTreeMap<Category, (f64, usize)> = BTreeMap::new();
        for (category, total, count) in rows {
            let entry = totals.entry(Category::normalize(&category)).or_default();
            entry.0 += total;
            entry.1 += count as usize;
        }

        Ok(totals
            .into_iter()
            .map(|(category, (total, count))| CategoryPriceTotal {
                category,
                total: Money::from_dollars(total),
                count,
            })
            .collect())
    }

    fn query_expenses<P: Params>(&self, sql: &str, params: P) -> ExpenseResult<Vec<Expense>> {
        let mut stmt = self.conn.prepare(sql)?;
        let expenses = stmt
            .query_map(params, row_to_expense)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(expenses)
    }
}

/// Convert a row selected with `SELECT_COLUMNS` back into an expense
fn row_to_expense(row: &Row<'_>) -> rusqlite::Result<Expense> {
    let date_text: String = row.get(5)?;
    let date = parse_date(&date_text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
    let category: String = row.get(4)?;

    Ok(Expense {
        id: Some(ExpenseId::new(row.get(0)?)),
        name: row.get(1)?,
        price: Money::from_dollars(row.get(2)?),
        amount: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
        category: Category::normalize(&category),
        date,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReportMonth;
    use crate::storage::schema::initialize_schema;

    fn create_test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(name: &str, cents: i64, amount: i64, category: &str, on: NaiveDate) -> Expense {
        Expense::new(name, Money::from_cents(cents), amount, category, on).unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);

        let id = repo
            .insert(&expense("Coffee", 450, 2, "Food", date(2024, 1, 5)))
            .unwrap();

        let stored = repo.get(id).unwrap().unwrap();
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.name, "Coffee");
        assert_eq!(stored.price.cents(), 450);
        assert_eq!(stored.amount, 2);
        assert_eq!(stored.category, Category::Food);
        assert_eq!(stored.date, date(2024, 1, 5));
    }

    #[test]
    fn test_insert_rejects_invalid_record() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);

        let mut bad = expense("Coffee", 450, 2, "food", date(2024, 1, 5));
        bad.name = String::new();

        let err = repo.insert(&bad).unwrap_err();
        assert!(matches!(err, ExpenseError::InvalidArgument(_)));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_date_is_stored_as_iso_text() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("Rent", 120000, 1, "rent", date(2024, 3, 1)))
            .unwrap();

        let stored: String = conn
            .query_row("SELECT date FROM expense_tracker", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, "2024-03-01");
    }

    #[test]
    fn test_get_all_in_insertion_order() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("B", 100, 1, "food", date(2024, 2, 1))).unwrap();
        repo.insert(&expense("A", 100, 1, "food", date(2024, 1, 1))).unwrap();

        let names: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_update_by_id_touches_one_row() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        let first = repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();
        let second = repo.insert(&expense("Coffee", 300, 1, "food", date(2024, 1, 6))).unwrap();

        let replacement = expense("Coffee", 500, 4, "entertainment", date(2024, 1, 7));
        assert_eq!(repo.update(first, &replacement).unwrap(), 1);

        let updated = repo.get(first).unwrap().unwrap();
        assert_eq!(updated.price.cents(), 500);
        assert_eq!(updated.amount, 4);
        assert_eq!(updated.category, Category::Entertainment);
        assert_eq!(updated.date, date(2024, 1, 7));

        let untouched = repo.get(second).unwrap().unwrap();
        assert_eq!(untouched.price.cents(), 300);
    }

    #[test]
    fn test_update_missing_id_changes_nothing() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();

        let replacement = expense("Coffee", 1, 1, "other", date(2020, 1, 1));
        assert_eq!(repo.update(ExpenseId::new(999), &replacement).unwrap(), 0);

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price.cents(), 450);
    }

    #[test]
    fn test_delete_by_name_removes_all_matches() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();
        repo.insert(&expense("Coffee", 450, 1, "food", date(2024, 1, 6))).unwrap();
        repo.insert(&expense("Bus", 200, 10, "transportation", date(2024, 1, 10))).unwrap();

        assert_eq!(repo.delete_by_name("Tea").unwrap(), 0);
        assert_eq!(repo.count().unwrap(), 3);

        assert_eq!(repo.delete_by_name("Coffee").unwrap(), 2);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_by_id() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        let id = repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();

        assert_eq!(repo.delete(id).unwrap(), 1);
        assert_eq!(repo.delete(id).unwrap(), 0);
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn test_get_by_category() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();
        repo.insert(&expense("Bus", 200, 10, "transportation", date(2024, 1, 10))).unwrap();

        let food = repo.get_by_category(Category::Food).unwrap();
        assert_eq!(food.len(), 1);
        assert_eq!(food[0].name, "Coffee");
        assert!(repo.get_by_category(Category::Rent).unwrap().is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        for day in [9, 10, 15, 20, 21] {
            repo.insert(&expense("X", 100, 1, "other", date(2024, 1, day))).unwrap();
        }

        let range = repo
            .get_by_date_range(date(2024, 1, 10), date(2024, 1, 20))
            .unwrap();
        let days: Vec<_> = range.iter().map(|e| e.date).collect();
        assert_eq!(days, vec![date(2024, 1, 10), date(2024, 1, 15), date(2024, 1, 20)]);
    }

    #[test]
    fn test_total_price() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        assert_eq!(repo.total_price().unwrap(), Money::zero());

        repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();
        repo.insert(&expense("Bus", 200, 10, "transportation", date(2024, 1, 10))).unwrap();
        repo.insert(&expense("Movie", 1299, 1, "entertainment", date(2024, 2, 3))).unwrap();

        assert_eq!(repo.total_price().unwrap().cents(), 1949);
    }

    #[test]
    fn test_amount_aggregates_over_month_window() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();
        repo.insert(&expense("Bagel", 300, 3, "food", date(2024, 1, 31))).unwrap();
        repo.insert(&expense("Bus", 200, 10, "transportation", date(2024, 1, 10))).unwrap();
        repo.insert(&expense("Late", 100, 7, "food", date(2024, 2, 1))).unwrap();

        let window = ReportMonth::new(2024, 1).unwrap().month_window();
        assert_eq!(repo.sum_amount(window).unwrap(), 15);

        let by_category = repo.amount_by_category(window).unwrap();
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category[&Category::Food], 5);
        assert_eq!(by_category[&Category::Transportation], 10);
    }

    #[test]
    fn test_amount_aggregates_empty_window() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);

        let window = ReportMonth::new(2024, 12).unwrap().month_window();
        assert_eq!(repo.sum_amount(window).unwrap(), 0);
        assert!(repo.amount_by_category(window).unwrap().is_empty());
    }

    #[test]
    fn test_price_by_category() {
        let conn = create_test_conn();
        let repo = ExpenseRepository::new(&conn);
        repo.insert(&expense("Coffee", 450, 2, "food", date(2024, 1, 5))).unwrap();
        repo.insert(&expense("Bagel", 300, 3, "food", date(2024, 1, 6))).unwrap();
        repo.insert(&expense("Bus", 200, 10, "transportation", date(2024, 1, 10))).unwrap();

        let totals = repo
            .price_by_category(date(2024, 1, 1), date(2024, 1, 31))
            .unwrap();
        assert_eq!(
            totals,
            vec![
                CategoryPriceTotal {
                    category: Category::Food,
                    total: Money::from_cents(750),
                    count: 2,
                },
                CategoryPriceTotal {
                    category: Category::Transportation,
                    total: Money::from_cents(200),
                    count: 1,
                },
            ]
        );
    }

    #[test]
    fn test_legacy_mixed_case_category_is_normalized_on_read() {
        let conn = create_test_conn();
        conn.execute(
            "INSERT INTO expense_tracker (name, price, amount, category, date)
             VALUES ('Shirt', 25.0, 1, 'Clothing', '2024-01-05')",
            [],
        )
        .unwrap();

        let repo = ExpenseRepository::new(&conn);
        assert_eq!(repo.get_all().unwrap()[0].category, Category::Clothing);
    }
}
