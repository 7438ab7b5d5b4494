use serde::{Deserialize, Serialize};

use super::errors::{DomainError, DomainResult};

/// An in-memory table: one header per column plus the data rows.
///
/// Rows produced by the model's own mutations always have one cell per
/// header. Rows parsed from ragged input keep their parsed length; the
/// model never pads or truncates them behind the caller's back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Document {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// True when no file has been loaded: no headers and no rows.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cell text, or "" for indices outside the table.
    pub fn get_cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Replaces exactly one cell with `value`, verbatim.
    ///
    /// No validation is applied to the value; a cell containing the
    /// delimiter will shift column alignment on the next serialize.
    /// Out-of-range indices leave the document untouched.
    pub fn set_cell(&mut self, row: usize, col: usize, value: String) -> DomainResult<()> {
        let cells = self
            .rows
            .get_mut(row)
            .ok_or(DomainError::RowOutOfRange(row))?;
        let cell = cells
            .get_mut(col)
            .ok_or(DomainError::ColumnOutOfRange(col))?;
        *cell = value;
        Ok(())
    }

    /// Appends a row of empty cells, one per header.
    pub fn add_row(&mut self) {
        self.rows.push(vec![String::new(); self.headers.len()]);
    }

    /// Removes the row at `index`; all later rows shift up by one.
    pub fn delete_row(&mut self, index: usize) -> DomainResult<()> {
        if index >= self.rows.len() {
            return Err(DomainError::RowOutOfRange(index));
        }
        self.rows.remove(index);
        Ok(())
    }
}
