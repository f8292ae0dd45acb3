//! Table types.

use super::Inline;
use serde::{Deserialize, Serialize};

/// Per-column alignment taken from a table's alignment row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    /// `:---` or `---`
    #[default]
    Left,
    /// `:---:`
    Center,
    /// `---:`
    Right,
}

impl ColumnAlign {
    /// Parse an alignment cell such as `:--:`. Returns `None` for anything
    /// that is not a dash run with optional colons.
    pub fn parse(cell: &str) -> Option<Self> {
        let cell = cell.trim();
        let left = cell.starts_with(':');
        let right = cell.len() > 1 && cell.ends_with(':');
        let dashes = cell.trim_start_matches(':').trim_end_matches(':');
        if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
            return None;
        }
        Some(match (left, right) {
            (true, true) => ColumnAlign::Center,
            (false, true) => ColumnAlign::Right,
            _ => ColumnAlign::Left,
        })
    }

    /// Column specifier letter for a `tabular` preamble.
    pub fn spec(self) -> char {
        match self {
            ColumnAlign::Left => 'l',
            ColumnAlign::Center => 'c',
            ColumnAlign::Right => 'r',
        }
    }
}

/// A table structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Header row
    pub header: TableRow,

    /// One alignment per column
    pub alignments: Vec<ColumnAlign>,

    /// Body rows
    pub body: Vec<TableRow>,

    /// 1-based source line of the header row
    pub line: usize,
}

impl Table {
    /// Get the number of columns (based on the header row).
    pub fn column_count(&self) -> usize {
        self.header.cells.len()
    }

    /// Get the number of body rows.
    pub fn row_count(&self) -> usize {
        self.body.len()
    }

    /// `tabular` column specification, e.g. `crl`.
    pub fn column_spec(&self) -> String {
        self.alignments.iter().map(|a| a.spec()).collect()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a new row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Parsed cell content
    pub content: Vec<Inline>,
}

impl TableCell {
    /// Create a cell with plain text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Inline::text(text)],
        }
    }

    /// Get plain text content.
    pub fn plain_text(&self) -> String {
        Inline::plain_text(&self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_align_parse() {
        assert_eq!(ColumnAlign::parse(":-:"), Some(ColumnAlign::Center));
        assert_eq!(ColumnAlign::parse(" --: "), Some(ColumnAlign::Right));
        assert_eq!(ColumnAlign::parse(":--"), Some(ColumnAlign::Left));
        assert_eq!(ColumnAlign::parse("---"), Some(ColumnAlign::Left));
        assert_eq!(ColumnAlign::parse(":"), None);
        assert_eq!(ColumnAlign::parse("::"), None);
        assert_eq!(ColumnAlign::parse("a-b"), None);
        assert_eq!(ColumnAlign::parse(""), None);
    }

    #[test]
    fn test_column_spec() {
        let table = Table {
            header: TableRow::from_strings(["A", "B", "C"]),
            alignments: vec![ColumnAlign::Center, ColumnAlign::Right, ColumnAlign::Left],
            body: vec![TableRow::from_strings(["1", "2", "3"])],
            line: 1,
        };
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column_spec(), "crl");
        assert_eq!(table.body[0].cells[1].plain_text(), "2");
    }
}
