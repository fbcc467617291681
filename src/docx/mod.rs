//! Word (`.docx`) table reading and cell editing.
//!
//! Tables are addressed the way Word lays them out: `table` indexes the
//! tables directly in the document body, `row` the rows of that table and
//! `column` the columns of its grid, all zero-based.
//!
//! # Example
//!
//! ```no_run
//! use docproc::docx;
//!
//! let names = docx::extract_column("roster.docx", 0)?;
//! docx::modify_cell("roster.docx", 0, 1, 2, "approved")?;
//! assert_eq!(docx::read_cell("roster.docx", 0, 1, 2)?, "approved");
//! # Ok::<(), docproc::Error>(())
//! ```

mod package;
mod reader;
mod table;
mod wml;
mod writer;

use std::path::Path;

use crate::error::{Error, Result};

pub use package::DOCUMENT_PART;
pub use reader::parse_tables;
pub use table::{CellPosition, Table, TableCell, TableRow, VerticalMerge};
pub use writer::{rewrite_cell, Alignment, CellTarget};

/// Read every body-level table of a document.
pub fn read_tables<P: AsRef<Path>>(path: P) -> Result<Vec<Table>> {
    let xml = package::read_part(path.as_ref(), DOCUMENT_PART)?;
    parse_tables(&xml)
}

/// Read one column of the first table, top to bottom.
///
/// A document without tables yields an empty list.
pub fn extract_column<P: AsRef<Path>>(path: P, column: usize) -> Result<Vec<String>> {
    let tables = read_tables(path)?;
    match tables.first() {
        Some(table) => table.column(column),
        None => Ok(Vec::new()),
    }
}

/// Read the text of one cell.
pub fn read_cell<P: AsRef<Path>>(
    path: P,
    table: usize,
    row: usize,
    column: usize,
) -> Result<String> {
    let tables = read_tables(path)?;
    let found = tables.get(table).ok_or(Error::TableOutOfRange {
        index: table,
        count: tables.len(),
    })?;
    Ok(found.cell(row, column)?.text())
}

/// Overwrite one cell's text, centre it, and save the document in place.
///
/// Indices are validated before anything is written; on error the file is
/// left untouched.
pub fn modify_cell<P: AsRef<Path>>(
    path: P,
    table: usize,
    row: usize,
    column: usize,
    value: &str,
) -> Result<()> {
    CellEdit::new(value).apply(path, table, row, column)
}

/// A pending cell overwrite.
#[derive(Debug, Clone)]
pub struct CellEdit {
    /// New cell text; `\n` becomes a line break and `\t` a tab
    pub value: String,

    /// Alignment of the first paragraph
    pub alignment: Alignment,
}

impl CellEdit {
    /// Create an edit with centred alignment.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            alignment: Alignment::default(),
        }
    }

    /// Set the paragraph alignment.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Apply the edit to cell `(row, column)` of body table `table`.
    pub fn apply<P: AsRef<Path>>(
        &self,
        path: P,
        table: usize,
        row: usize,
        column: usize,
    ) -> Result<()> {
        let path = path.as_ref();
        let xml = package::read_part(path, DOCUMENT_PART)?;
        let tables = parse_tables(&xml)?;

        let target_table = tables.get(table).ok_or(Error::TableOutOfRange {
            index: table,
            count: tables.len(),
        })?;
        let position = target_table.locate(row, column)?;

        let updated = rewrite_cell(
            &xml,
            CellTarget {
                table,
                row: position.row,
                index: position.index,
            },
            &self.value,
            self.alignment,
        )?;
        package::replace_part(path, DOCUMENT_PART, &updated)?;

        log::info!(
            "Set table {} cell ({}, {}) of {}",
            table,
            row,
            column,
            path.display()
        );
        Ok(())
    }
}
