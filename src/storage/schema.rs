//! Database schema
//!
//! A single table holds every expense. Dates are stored as `YYYY-MM-DD` text
//! and prices as REAL dollars.

use rusqlite::Connection;

use crate::error::ExpenseResult;

/// Name of the expense table
pub const EXPENSE_TABLE: &str = "expense_tracker";

/// Create the expense table if it does not exist yet
pub fn initialize_schema(conn: &Connection) -> ExpenseResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS expense_tracker (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            price FLOAT NOT NULL,
            amount INTEGER,
            category TEXT NOT NULL,
            date DATE NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_tracker_date ON expense_tracker(date)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_tracker_name ON expense_tracker(name)",
        [],
    )?;

    tracing::debug!(table = EXPENSE_TABLE, "schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_count(conn: &Connection) -> i64 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [EXPENSE_TABLE],
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn test_schema_created() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        assert_eq!(table_count(&conn), 1);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO expense_tracker (name, price, amount, category, date)
             VALUES ('Coffee', 4.5, 2, 'food', '2024-01-05')",
            [],
        )
        .unwrap();

        initialize_schema(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM expense_tracker", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
