//! Table models.

use super::TextRun;
use serde::{Deserialize, Serialize};

/// A table cell.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Text runs in this cell
    #[serde(default)]
    pub runs: Vec<TextRun>,
}

impl Cell {
    /// Create a cell with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::plain(text)],
        }
    }

    /// Get the plain text content.
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    /// Cells in this row
    #[serde(default)]
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from plain text cells.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::with_text).collect(),
        }
    }
}

/// A table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Table rows, header row first when `has_header` is set
    #[serde(default)]
    pub rows: Vec<Row>,

    /// Whether the first row is a header row
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub has_header: bool,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of columns, taken from the widest row.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
    }

    /// Get the plain text content, one tab-separated line per row.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(Cell::plain_text)
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let mut table = Table::new();
        table.has_header = true;
        table.rows.push(Row::from_texts(["Name", "Value"]));
        table.rows.push(Row::from_texts(["a", "1"]));

        assert_eq!(table.column_count(), 2);
        assert_eq!(table.plain_text(), "Name\tValue\na\t1");
    }
}
