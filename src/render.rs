//! Terminal rendering for the participant screen.

use owo_colors::OwoColorize;
use roster_core::table::{EMPTY_TABLE_TEXT, EventOption, TABLE_HEADERS, TableRow};

const BANNER: &str = "SAMAVESH X VASSAUNT";
const COLUMN_GAP: &str = "  ";

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventOption {
    fn render(&self) -> String {
        format!("{} {}", self.label, self.value.dimmed())
    }
}

pub fn banner() -> String {
    BANNER.red().bold().to_string()
}

/// Participant table, or the placeholder line when there is nothing to show.
pub fn participants_table(rows: &[TableRow]) -> String {
    if rows.is_empty() {
        return EMPTY_TABLE_TEXT.dimmed().to_string();
    }

    let mut lines = layout(rows);
    lines[0] = lines[0].bold().to_string();
    lines.join("\n")
}

/// Pad every column to its widest cell. The first line is the header.
fn layout(rows: &[TableRow]) -> Vec<String> {
    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header = TABLE_HEADERS.map(String::from);
    std::iter::once(&header)
        .chain(rows)
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP)
                .trim_end()
                .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: [&str; 6]) -> TableRow {
        cells.map(String::from)
    }

    #[test]
    fn test_layout_aligns_columns() {
        let rows = vec![
            row(["Alice", "a@x.com", "MIT", "2024", "CS", "123"]),
            row(["Bartholomew", "b@x.com", "IIT", "2025", "ECE", "4567"]),
        ];

        let lines = layout(&rows);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name         Email"));
        assert!(lines[1].starts_with("Alice        a@x.com"));
        assert!(lines[2].starts_with("Bartholomew  b@x.com"));
        assert!(lines[2].ends_with("ECE     4567"));
    }

    #[test]
    fn test_header_order() {
        let lines = layout(&[row(["a", "b", "c", "d", "e", "f"])]);

        assert_eq!(lines[0], "Name  Email  College  Year  Branch  Phone");
    }

    #[test]
    fn test_empty_table_placeholder() {
        assert!(participants_table(&[]).contains("Select an event to view participants"));
    }
}
