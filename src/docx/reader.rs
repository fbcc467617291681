//! Table extraction from `word/document.xml`.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::Result;

use super::table::{Table, TableCell, TableRow, VerticalMerge};
use super::wml;

/// Parse every body-level table of a WordprocessingML main document.
///
/// Nested tables are not returned; their text is not part of the enclosing
/// cell either.
pub fn parse_tables(xml: &[u8]) -> Result<Vec<Table>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut scan = TableScan::default();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                scan.open(&e)?;
                scan.stack.push(e.name().as_ref().to_vec());
            }
            Event::Empty(e) => {
                scan.open(&e)?;
                scan.close_contexts();
            }
            Event::End(_) => {
                scan.stack.pop();
                scan.close_contexts();
            }
            Event::Text(t) => {
                if scan.in_text() {
                    let text = t.unescape()?;
                    scan.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(scan.tables)
}

/// Element stack plus the depth at which the current table, row, cell and
/// paragraph were opened. A depth is the stack length while the element is
/// on top.
#[derive(Default)]
struct TableScan {
    stack: Vec<Vec<u8>>,
    tables: Vec<Table>,
    table: Option<usize>,
    row: Option<usize>,
    cell: Option<usize>,
    paragraph: Option<usize>,
}

impl TableScan {
    fn open(&mut self, e: &BytesStart) -> Result<()> {
        let name = e.name();
        let name = name.as_ref();
        let depth = self.stack.len();
        let parent = self.stack.last().cloned();
        let parent = parent.as_deref();

        if name == wml::TBL && parent == Some(wml::BODY) {
            self.tables.push(Table::new());
            self.table = Some(depth + 1);
            return Ok(());
        }

        let Some(table_depth) = self.table else {
            return Ok(());
        };

        if name == wml::GRID_COL && parent == Some(wml::TBL_GRID) && depth == table_depth + 1 {
            if let Some(table) = self.tables.last_mut() {
                table.grid_columns += 1;
            }
        } else if name == wml::TR && depth == table_depth {
            if let Some(table) = self.tables.last_mut() {
                table.add_row(TableRow::new());
            }
            self.row = Some(depth + 1);
        } else if let Some(row_depth) = self.row {
            if name == wml::TC && depth == row_depth {
                if let Some(row) = self.current_row() {
                    row.add_cell(TableCell::default());
                }
                self.cell = Some(depth + 1);
            } else if name == wml::GRID_BEFORE
                && parent == Some(wml::TR_PR)
                && depth == row_depth + 1
            {
                let value = wml::int_val(e)?.unwrap_or(0);
                if let Some(row) = self.current_row() {
                    row.grid_before = value;
                }
            } else if let Some(cell_depth) = self.cell {
                self.open_in_cell(e, name, parent, depth, cell_depth)?;
            }
        }

        Ok(())
    }

    fn open_in_cell(
        &mut self,
        e: &BytesStart,
        name: &[u8],
        parent: Option<&[u8]>,
        depth: usize,
        cell_depth: usize,
    ) -> Result<()> {
        if name == wml::P && depth == cell_depth {
            if let Some(cell) = self.current_cell() {
                cell.paragraphs.push(String::new());
            }
            self.paragraph = Some(depth + 1);
        } else if parent == Some(wml::TC_PR) && depth == cell_depth + 1 {
            if name == wml::GRID_SPAN {
                let span = wml::int_val(e)?.unwrap_or(1).max(1);
                if let Some(cell) = self.current_cell() {
                    cell.grid_span = span;
                }
            } else if name == wml::V_MERGE {
                let merge = match wml::str_val(e)?.as_deref() {
                    Some("restart") => VerticalMerge::Restart,
                    _ => VerticalMerge::Continue,
                };
                if let Some(cell) = self.current_cell() {
                    cell.vertical_merge = Some(merge);
                }
            }
        } else if self.paragraph.is_some() && parent == Some(wml::R) {
            if name == wml::TAB {
                self.push_text("\t");
            } else if name == wml::CR {
                self.push_text("\n");
            } else if name == wml::BR {
                // Page and column breaks carry no text.
                if !matches!(wml::attr(e, b"w:type")?.as_deref(), Some("page" | "column")) {
                    self.push_text("\n");
                }
            }
        }
        Ok(())
    }

    /// Drop every context that is no longer on the stack.
    fn close_contexts(&mut self) {
        let depth = self.stack.len();
        for slot in [
            &mut self.paragraph,
            &mut self.cell,
            &mut self.row,
            &mut self.table,
        ] {
            if slot.is_some_and(|d| d > depth) {
                *slot = None;
            }
        }
    }

    fn in_text(&self) -> bool {
        self.paragraph.is_some() && self.stack.last().map(Vec::as_slice) == Some(wml::T)
    }

    fn push_text(&mut self, text: &str) {
        if let Some(paragraph) = self
            .current_cell()
            .and_then(|cell| cell.paragraphs.last_mut())
        {
            paragraph.push_str(text);
        }
    }

    fn current_row(&mut self) -> Option<&mut TableRow> {
        self.tables.last_mut()?.rows.last_mut()
    }

    fn current_cell(&mut self) -> Option<&mut TableCell> {
        self.current_row()?.cells.last_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}<w:sectPr/></w:body></w:document>"#,
            body
        )
    }

    #[test]
    fn test_no_tables() {
        let xml = document("<w:p><w:r><w:t>Just text</w:t></w:r></w:p>");
        assert!(parse_tables(xml.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_simple_table() {
        let xml = document(
            r#"<w:tbl><w:tblPr/><w:tblGrid><w:gridCol w:w="100"/><w:gridCol w:w="100"/></w:tblGrid>
<w:tr><w:tc><w:p><w:r><w:t>Name</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>Score</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:p><w:r><w:t xml:space="preserve">Li </w:t></w:r><w:r><w:t>Wei</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>9&amp;1</w:t></w:r></w:p></w:tc></w:tr>
</w:tbl>"#,
        );
        let tables = parse_tables(xml.as_bytes()).unwrap();
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.grid_columns, 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column(0).unwrap(), vec!["Name", "Li Wei"]);
        assert_eq!(table.column(1).unwrap(), vec!["Score", "9&1"]);
    }

    #[test]
    fn test_paragraphs_tabs_and_breaks() {
        let xml = document(
            r#"<w:tbl><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc>
<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/></w:tabs></w:pPr><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t><w:br w:type="page"/></w:r></w:p>
<w:p/>
<w:p><w:r><w:t>second</w:t></w:r></w:p>
</w:tc></w:tr></w:tbl>"#,
        );
        let tables = parse_tables(xml.as_bytes()).unwrap();
        let cell = tables[0].cell(0, 0).unwrap();
        assert_eq!(cell.paragraphs, vec!["a\tb\nc", "", "second"]);
    }

    #[test]
    fn test_merged_cells() {
        let xml = document(
            r#"<w:tbl><w:tblGrid><w:gridCol/><w:gridCol/><w:gridCol/></w:tblGrid>
<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/><w:vMerge w:val="restart"/></w:tcPr><w:p><w:r><w:t>wide</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>c</w:t></w:r></w:p></w:tc></w:tr>
<w:tr><w:tc><w:tcPr><w:gridSpan w:val="2"/><w:vMerge/></w:tcPr><w:p/></w:tc><w:tc><w:p><w:r><w:t>f</w:t></w:r></w:p></w:tc></w:tr>
</w:tbl>"#,
        );
        let tables = parse_tables(xml.as_bytes()).unwrap();
        let table = &tables[0];
        assert_eq!(table.rows[0].cells[0].grid_span, 2);
        assert_eq!(
            table.rows[1].cells[0].vertical_merge,
            Some(VerticalMerge::Continue)
        );
        assert_eq!(table.column(1).unwrap(), vec!["wide", "wide"]);
        assert_eq!(table.column(2).unwrap(), vec!["c", "f"]);
    }

    #[test]
    fn test_nested_table_is_not_top_level() {
        let xml = document(
            r#"<w:tbl><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc>
<w:p><w:r><w:t>outer</w:t></w:r></w:p>
<w:tbl><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p><w:r><w:t>inner</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
<w:p/>
</w:tc></w:tr></w:tbl>
<w:p><w:r><w:t>between</w:t></w:r></w:p>
<w:tbl><w:tblGrid><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p><w:r><w:t>second</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#,
        );
        let tables = parse_tables(xml.as_bytes()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].cell(0, 0).unwrap().paragraphs, vec!["outer", ""]);
        assert_eq!(tables[1].cell(0, 0).unwrap().text(), "second");
    }

    #[test]
    fn test_grid_before() {
        let xml = document(
            r#"<w:tbl><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid>
<w:tr><w:trPr><w:gridBefore w:val="1"/></w:trPr><w:tc><w:p><w:r><w:t>x</w:t></w:r></w:p></w:tc></w:tr>
</w:tbl>"#,
        );
        let tables = parse_tables(xml.as_bytes()).unwrap();
        assert_eq!(tables[0].rows[0].grid_before, 1);
        assert_eq!(tables[0].cell(0, 1).unwrap().text(), "x");
    }
}
