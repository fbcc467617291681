//! Table types.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A body-level table of a Word document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<TableRow>,

    /// Number of columns declared by the table grid (`w:tblGrid`)
    pub grid_columns: usize,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of grid columns.
    ///
    /// Falls back to the widest row when the grid is missing.
    pub fn column_count(&self) -> usize {
        if self.grid_columns > 0 {
            self.grid_columns
        } else {
            self.rows.iter().map(TableRow::width).max().unwrap_or(0)
        }
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the physical cell that holds grid position `(row, column)`.
    ///
    /// Horizontally merged cells cover every grid column they span; a
    /// vertically merged continuation resolves to the cell that starts the
    /// merge.
    pub fn locate(&self, row: usize, column: usize) -> Result<CellPosition> {
        let out_of_range = || Error::CellOutOfRange {
            row,
            column,
            rows: self.row_count(),
            columns: self.column_count(),
        };

        if row >= self.row_count() || column >= self.column_count() {
            return Err(out_of_range());
        }

        let mut current = row;
        loop {
            let index = self.rows[current]
                .cell_index_at(column)
                .ok_or_else(out_of_range)?;
            let cell = &self.rows[current].cells[index];
            if cell.vertical_merge == Some(VerticalMerge::Continue) && current > 0 {
                current -= 1;
                continue;
            }
            return Ok(CellPosition {
                row: current,
                index,
            });
        }
    }

    /// Get the cell at grid position `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Result<&TableCell> {
        let pos = self.locate(row, column)?;
        Ok(&self.rows[pos.row].cells[pos.index])
    }

    /// Get the text of one grid column, top to bottom.
    pub fn column(&self, column: usize) -> Result<Vec<String>> {
        (0..self.row_count())
            .map(|row| self.cell(row, column).map(TableCell::text))
            .collect()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Physical location of a cell: row index and index of the `w:tc` in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub row: usize,
    pub index: usize,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row
    pub cells: Vec<TableCell>,

    /// Grid columns skipped before the first cell
    pub grid_before: usize,
}

impl TableRow {
    /// Create a new empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cell to the row.
    pub fn add_cell(&mut self, cell: TableCell) {
        self.cells.push(cell);
    }

    /// Number of grid columns covered by this row.
    pub fn width(&self) -> usize {
        self.grid_before + self.cells.iter().map(|c| c.grid_span).sum::<usize>()
    }

    /// Index of the cell covering a grid column.
    pub fn cell_index_at(&self, column: usize) -> Option<usize> {
        let mut start = self.grid_before;
        if column < start {
            return None;
        }
        for (index, cell) in self.cells.iter().enumerate() {
            let end = start + cell.grid_span;
            if column < end {
                return Some(index);
            }
            start = end;
        }
        None
    }

    /// Get plain text of the row (cells separated by tabs).
    pub fn plain_text(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.text())
            .collect::<Vec<_>>()
            .join("\t")
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    /// Text of each paragraph directly inside the cell
    pub paragraphs: Vec<String>,

    /// Number of grid columns spanned (`w:gridSpan`)
    pub grid_span: usize,

    /// Vertical merge state (`w:vMerge`)
    pub vertical_merge: Option<VerticalMerge>,
}

impl TableCell {
    /// Create a cell with a single paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![text.into()],
            ..Self::default()
        }
    }

    /// Cell text: paragraphs joined by newlines.
    pub fn text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            grid_span: 1,
            vertical_merge: None,
        }
    }
}

/// Vertical merge state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalMerge {
    /// First cell of a vertically merged region
    Restart,
    /// Continuation of the region above
    Continue,
}
