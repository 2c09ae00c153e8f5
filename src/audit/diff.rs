//! Change summaries for audited updates

use crate::models::{format_date, Expense};

/// Describe which fields differ between two versions of an expense
///
/// Returns `None` when nothing changed.
pub fn describe_changes(before: &Expense, after: &Expense) -> Option<String> {
    let mut changes = Vec::new();

    if before.name != after.name {
        changes.push(format!("name: \"{}\" -> \"{}\"", before.name, after.name));
    }
    if before.price != after.price {
        changes.push(format!("price: {} -> {}", before.price, after.price));
    }
    if before.amount != after.amount {
        changes.push(format!("amount: {} -> {}", before.amount, after.amount));
    }
    if before.category != after.category {
        changes.push(format!("category: {} -> {}", before.category, after.category));
    }
    if before.date != after.date {
        changes.push(format!(
            "date: {} -> {}",
            format_date(before.date),
            format_date(after.date)
        ));
    }

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};
    use chrono::NaiveDate;

    fn coffee() -> Expense {
        Expense::new(
            "Coffee",
            Money::from_cents(450),
            2,
            "food",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_no_changes() {
        assert!(describe_changes(&coffee(), &coffee()).is_none());
    }

    #[test]
    fn test_single_change() {
        let mut after = coffee();
        after.amount = 3;
        assert_eq!(
            describe_changes(&coffee(), &after).unwrap(),
            "amount: 2 -> 3"
        );
    }

    #[test]
    fn test_multiple_changes() {
        let mut after = coffee();
        after.price = Money::from_cents(500);
        after.category = Category::Entertainment;
        after.date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        let diff = describe_changes(&coffee(), &after).unwrap();
        assert_eq!(
            diff,
            "price: $4.50 -> $5.00, category: food -> entertainment, date: 2024-01-05 -> 2024-02-01"
        );
    }
}
