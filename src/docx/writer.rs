//! In-place cell rewriting of `word/document.xml`.
//!
//! The document is streamed event by event and copied unchanged except for
//! the target cell: every paragraph directly inside it loses its content
//! (paragraph properties survive), the first paragraph receives the new text
//! and an explicit `w:jc`.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::wml;

/// Paragraph alignment written into the edited cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of the `w:jc` element.
    pub fn as_wml(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Physical address of a `w:tc`: body-level table, row, and cell index
/// within the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellTarget {
    pub table: usize,
    pub row: usize,
    pub index: usize,
}

/// Rewrite one cell of a main document part.
pub fn rewrite_cell(
    xml: &[u8],
    target: CellTarget,
    value: &str,
    alignment: Alignment,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + value.len() + 64));
    let mut buf = Vec::new();
    let mut state = Rewrite {
        target,
        value,
        alignment,
        stack: Vec::new(),
        tables_seen: 0,
        rows_seen: 0,
        cells_seen: 0,
        table: None,
        row: None,
        cell: None,
        paragraphs: 0,
        paragraph: None,
        skip: None,
        found: false,
    };

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            Event::Start(e) => state.open(e, false, &mut writer)?,
            Event::Empty(e) => state.open(e, true, &mut writer)?,
            Event::End(e) => state.close(e, &mut writer)?,
            other => {
                if state.skip.is_none() {
                    writer.write_event(other)?;
                }
            }
        }
        buf.clear();
    }

    if !state.found {
        return Err(Error::Xml(format!(
            "cell {} of row {} in table {} not found",
            target.index, target.row, target.table
        )));
    }

    Ok(writer.into_inner())
}

/// Per-paragraph state for a paragraph directly inside the target cell.
struct ParagraphState {
    depth: usize,
    first: bool,
    properties_done: bool,
    properties_depth: Option<usize>,
    jc_written: bool,
}

/// What to do with an opening tag.
enum Action {
    Copy,
    Drop,
}

struct Rewrite<'a> {
    target: CellTarget,
    value: &'a str,
    alignment: Alignment,
    stack: Vec<Vec<u8>>,
    tables_seen: usize,
    rows_seen: usize,
    cells_seen: usize,
    table: Option<usize>,
    row: Option<usize>,
    cell: Option<usize>,
    paragraphs: usize,
    paragraph: Option<ParagraphState>,
    /// Depth of the element whose subtree is being dropped.
    skip: Option<usize>,
    found: bool,
}

impl Rewrite<'_> {
    fn open(&mut self, e: BytesStart, empty: bool, w: &mut Writer<Vec<u8>>) -> Result<()> {
        let name = e.name().as_ref().to_vec();
        let depth = self.stack.len();

        if self.skip.is_some() {
            if !empty {
                self.stack.push(name);
            }
            return Ok(());
        }

        let action = self.classify(&name, &e, empty, depth, w)?;
        match action {
            Action::Copy if empty => w.write_event(Event::Empty(e))?,
            Action::Copy => w.write_event(Event::Start(e))?,
            Action::Drop if empty => {}
            Action::Drop => self.skip = Some(depth + 1),
        }

        if !empty {
            self.stack.push(name);
        }
        Ok(())
    }

    fn classify(
        &mut self,
        name: &[u8],
        e: &BytesStart,
        empty: bool,
        depth: usize,
        w: &mut Writer<Vec<u8>>,
    ) -> Result<Action> {
        let parent = self.stack.last().map(Vec::as_slice);

        if name == wml::TBL && parent == Some(wml::BODY) {
            if self.tables_seen == self.target.table {
                self.table = Some(depth + 1);
            }
            self.tables_seen += 1;
            return Ok(Action::Copy);
        }
        if name == wml::TR && self.table == Some(depth) {
            if self.rows_seen == self.target.row {
                self.row = Some(depth + 1);
            }
            self.rows_seen += 1;
            return Ok(Action::Copy);
        }
        if name == wml::TC && self.row == Some(depth) {
            if self.cells_seen == self.target.index {
                self.cell = Some(depth + 1);
                self.found = true;
                if empty {
                    // <w:tc/>: give it the paragraph it lacks.
                    w.write_event(Event::Start(e.clone()))?;
                    self.write_paragraph(w)?;
                    w.write_event(Event::End(BytesEnd::new("w:tc")))?;
                    self.cell = None;
                    return Ok(Action::Drop);
                }
            }
            self.cells_seen += 1;
            return Ok(Action::Copy);
        }

        let Some(cell_depth) = self.cell else {
            return Ok(Action::Copy);
        };

        if name == wml::P && depth == cell_depth {
            self.paragraphs += 1;
            let first = self.paragraphs == 1;
            if empty {
                if first {
                    w.write_event(Event::Start(e.clone()))?;
                    self.write_properties(w)?;
                    self.write_run(w)?;
                    w.write_event(Event::End(BytesEnd::new("w:p")))?;
                    return Ok(Action::Drop);
                }
                return Ok(Action::Copy);
            }
            self.paragraph = Some(ParagraphState {
                depth: depth + 1,
                first,
                properties_done: false,
                properties_depth: None,
                jc_written: false,
            });
            return Ok(Action::Copy);
        }

        let Some(para) = self.paragraph.as_mut() else {
            return Ok(Action::Copy);
        };

        if depth == para.depth {
            // Direct child of a paragraph in the target cell.
            if name == wml::P_PR {
                if !para.first {
                    return Ok(Action::Copy);
                }
                para.properties_done = true;
                if empty {
                    para.jc_written = true;
                    w.write_event(Event::Start(e.clone()))?;
                    write_jc(w, self.alignment)?;
                    w.write_event(Event::End(BytesEnd::new("w:pPr")))?;
                    return Ok(Action::Drop);
                }
                para.properties_depth = Some(depth + 1);
                return Ok(Action::Copy);
            }

            if para.first && !para.properties_done {
                para.properties_done = true;
                para.jc_written = true;
                write_properties(w, self.alignment)?;
            }
            return Ok(Action::Drop);
        }

        if para.properties_depth == Some(depth) {
            // Direct child of the first paragraph's pPr.
            if name == wml::JC {
                return Ok(Action::Drop);
            }
            if !para.jc_written && wml::AFTER_JC.contains(&name) {
                para.jc_written = true;
                write_jc(w, self.alignment)?;
            }
        }

        Ok(Action::Copy)
    }

    fn close(&mut self, e: BytesEnd, w: &mut Writer<Vec<u8>>) -> Result<()> {
        let closing = self.stack.len();
        self.stack.pop();

        if let Some(skip) = self.skip {
            if closing == skip {
                self.skip = None;
            }
            return Ok(());
        }

        if let Some(para) = self.paragraph.as_mut() {
            if para.properties_depth == Some(closing) {
                para.properties_depth = None;
                if !para.jc_written {
                    para.jc_written = true;
                    write_jc(w, self.alignment)?;
                }
            } else if para.depth == closing {
                let first = para.first;
                let properties_done = para.properties_done;
                self.paragraph = None;
                if first {
                    if !properties_done {
                        write_properties(w, self.alignment)?;
                    }
                    self.write_run(w)?;
                }
            }
        }

        if self.cell == Some(closing) {
            if self.paragraphs == 0 {
                self.write_paragraph(w)?;
            }
            self.cell = None;
        }
        if self.row == Some(closing) {
            self.row = None;
        }
        if self.table == Some(closing) {
            self.table = None;
        }

        w.write_event(Event::End(e))?;
        Ok(())
    }

    fn write_properties(&self, w: &mut Writer<Vec<u8>>) -> Result<()> {
        write_properties(w, self.alignment)
    }

    fn write_paragraph(&self, w: &mut Writer<Vec<u8>>) -> Result<()> {
        w.write_event(Event::Start(BytesStart::new("w:p")))?;
        self.write_properties(w)?;
        self.write_run(w)?;
        w.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }

    /// Write `value` as a single run; `\n` becomes `w:br`, `\t` becomes `w:tab`.
    fn write_run(&self, w: &mut Writer<Vec<u8>>) -> Result<()> {
        if self.value.is_empty() {
            return Ok(());
        }

        w.write_event(Event::Start(BytesStart::new("w:r")))?;
        let mut pending = String::new();
        for ch in self.value.chars() {
            match ch {
                '\n' | '\t' => {
                    write_text(w, &pending)?;
                    pending.clear();
                    let tag = if ch == '\n' { "w:br" } else { "w:tab" };
                    w.write_event(Event::Empty(BytesStart::new(tag)))?;
                }
                '\r' => {}
                _ => pending.push(ch),
            }
        }
        write_text(w, &pending)?;
        w.write_event(Event::End(BytesEnd::new("w:r")))?;
        Ok(())
    }
}

fn write_text(w: &mut Writer<Vec<u8>>, text: &str) -> Result<()> {
    if text.is_empty() {
        return Ok(());
    }
    w.write_event(Event::Start(
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    ))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new("w:t")))?;
    Ok(())
}

fn write_jc(w: &mut Writer<Vec<u8>>, alignment: Alignment) -> Result<()> {
    w.write_event(Event::Empty(
        BytesStart::new("w:jc").with_attributes([("w:val", alignment.as_wml())]),
    ))?;
    Ok(())
}

fn write_properties(w: &mut Writer<Vec<u8>>, alignment: Alignment) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("w:pPr")))?;
    write_jc(w, alignment)?;
    w.write_event(Event::End(BytesEnd::new("w:pPr")))?;
    Ok(())
}
