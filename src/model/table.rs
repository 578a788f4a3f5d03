//! Search results table.

use serde::{Deserialize, Serialize};

/// Results table as returned inside a search response.
///
/// `msg` is shown when there are no columns (the backend's "nothing found"
/// table). Rows may be ragged; readers must tolerate short rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultTable {
    /// Status message from the backend.
    #[serde(default)]
    pub msg: String,
    /// Header labels.
    #[serde(default)]
    pub columns: Vec<String>,
    /// Body rows.
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl ResultTable {
    /// Build a table from headers and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            msg: String::new(),
            columns,
            rows,
        }
    }

    /// Whether this table carries a header row.
    ///
    /// A table without columns is the "no results" message and gets neither
    /// pagination nor capture.
    pub fn has_results_marker(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell text at `(row, column)`, or `""` when the row is too short.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Every body cell in `column`, in row order.
    pub fn column_values(&self, column: usize) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.get(column).cloned().unwrap_or_default())
            .collect()
    }
}

/// Body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Result table.
    pub table: ResultTable,
    /// Server-side page count, informational.
    #[serde(default)]
    pub pages: Option<u64>,
}
