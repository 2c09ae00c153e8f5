//! Expense categories
//!
//! The set of categories is fixed. Parsing is case-insensitive and never
//! fails: anything unrecognised lands in [`Category::Other`]. This is the
//! only place category text is normalized; everything downstream (storage,
//! reports, filters) works with the enum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of an expense
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Food,
    Clothing,
    Entertainment,
    Rent,
    Utilities,
    Transportation,
    #[default]
    Other,
}

impl Category {
    /// Every category, in menu order
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Clothing,
        Category::Entertainment,
        Category::Rent,
        Category::Utilities,
        Category::Transportation,
        Category::Other,
    ];

    /// Normalize free text into a category, defaulting to `Other`
    pub fn normalize(input: &str) -> Self {
        Self::recognize(input).unwrap_or(Category::Other)
    }

    /// Strict lookup used by prompts that must re-ask on unknown input
    pub fn recognize(input: &str) -> Option<Self> {
        let needle = input.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
    }

    /// Lowercase storage form
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Clothing => "clothing",
            Category::Entertainment => "entertainment",
            Category::Rent => "rent",
            Category::Utilities => "utilities",
            Category::Transportation => "transportation",
            Category::Other => "other",
        }
    }

    /// Comma separated list of every category, for prompts and help text
    pub fn choices() -> String {
        Self::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_is_case_insensitive() {
        assert_eq!(Category::normalize("FOOD"), Category::Food);
        assert_eq!(Category::normalize("  Transportation "), Category::Transportation);
        assert_eq!(Category::normalize("rent"), Category::Rent);
    }

    #[test]
    fn test_unknown_becomes_other() {
        assert_eq!(Category::normalize("groceries"), Category::Other);
        assert_eq!(Category::normalize(""), Category::Other);
        assert_eq!(Category::recognize("groceries"), None);
    }

    #[test]
    fn test_storage_form_round_trips() {
        for category in Category::ALL {
            assert_eq!(Category::normalize(category.as_str()), category);
        }
    }

    #[test]
    fn test_choices() {
        assert_eq!(
            Category::choices(),
            "food, clothing, entertainment, rent, utilities, transportation, other"
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();
        assert_eq!(json, "\"entertainment\"");
    }
}
