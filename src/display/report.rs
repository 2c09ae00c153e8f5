//! Report formatting utilities for terminal output

/// Format a percentage with two decimals (e.g. "16.67%")
pub fn format_percentage(pct: f64) -> String {
    format!("{:.2}%", pct)
}

/// Format a fractional unit count with two decimals
pub fn format_units(units: f64) -> String {
    format!("{:.2}", units)
}

/// Width of a column: the longest of its header and its formatted cells
pub fn column_width<'a, I>(header: &str, cells: I) -> usize
where
    I: IntoIterator<Item = &'a String>,
{
    cells
        .into_iter()
        .map(|cell| cell.chars().count())
        .fold(header.chars().count(), usize::max)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Right-align text in a field of given width
pub fn right_align(s: &str, width: usize) -> String {
    format!("{:>width$}", s, width = width)
}

/// Left-align text in a field of given width
pub fn left_align(s: &str, width: usize) -> String {
    format!("{:<width$}", s, width = width)
}
