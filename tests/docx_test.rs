//! Integration tests for Word table reading and cell editing.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use docproc::docx::{self, Alignment, CellEdit};
use docproc::Error;

const NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn cell(text: &str) -> String {
    format!("<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>", text)
}

fn table(rows: &[&[&str]]) -> String {
    let columns = rows.first().map(|r| r.len()).unwrap_or(0);
    let mut xml = String::from("<w:tbl><w:tblGrid>");
    for _ in 0..columns {
        xml.push_str("<w:gridCol/>");
    }
    xml.push_str("</w:tblGrid>");
    for row in rows {
        xml.push_str("<w:tr>");
        for text in row.iter() {
            xml.push_str(&cell(text));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl>");
    xml
}

fn write_docx(path: &Path, body: &str) {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{}"><w:body>{}<w:sectPr/></w:body></w:document>"#,
        NS, body
    );

    let mut writer = ZipWriter::new(File::create(path).unwrap());
    let options = SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.start_file("word/styles.xml", options).unwrap();
    writer.write_all(b"<w:styles/>").unwrap();
    writer.finish().unwrap();
}

fn read_entry(path: &Path, name: &str) -> String {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut content = String::new();
    entry.read_to_string(&mut content).unwrap();
    content
}

fn roster(dir: &Path) -> PathBuf {
    let path = dir.join("roster.docx");
    let body = format!(
        "<w:p><w:r><w:t>Roster</w:t></w:r></w:p>{}<w:p/>{}",
        table(&[
            &["Name", "Score", "Note"],
            &["Alice", "90", ""],
            &["Bob", "85", "late"],
        ]),
        table(&[&["second"]]),
    );
    write_docx(&path, &body);
    path
}

#[test]
fn test_extract_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());

    assert_eq!(
        docx::extract_column(&path, 0).unwrap(),
        vec!["Name", "Alice", "Bob"]
    );
    assert_eq!(
        docx::extract_column(&path, 2).unwrap(),
        vec!["Note", "", "late"]
    );
}

#[test]
fn test_extract_column_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());

    assert!(matches!(
        docx::extract_column(&path, 3),
        Err(Error::CellOutOfRange { column: 3, .. })
    ));
}

#[test]
fn test_extract_column_without_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.docx");
    write_docx(&path, "<w:p><w:r><w:t>No tables here</w:t></w:r></w:p>");

    assert!(docx::extract_column(&path, 0).unwrap().is_empty());
}

#[test]
fn test_read_tables() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());

    let tables = docx::read_tables(&path).unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].row_count(), 3);
    assert_eq!(tables[0].column_count(), 3);
    assert_eq!(docx::read_cell(&path, 1, 0, 0).unwrap(), "second");
}

#[test]
fn test_modify_cell_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());

    docx::modify_cell(&path, 0, 1, 1, "95").unwrap();

    assert_eq!(docx::read_cell(&path, 0, 1, 1).unwrap(), "95");
    assert_eq!(
        docx::extract_column(&path, 1).unwrap(),
        vec!["Score", "95", "85"]
    );
    assert_eq!(docx::read_cell(&path, 0, 2, 2).unwrap(), "late");
    assert_eq!(docx::read_cell(&path, 1, 0, 0).unwrap(), "second");

    let document = read_entry(&path, "word/document.xml");
    assert!(document.contains(r#"<w:jc w:val="center"/>"#));
    assert!(document.contains("<w:t>Roster</w:t>"));
    assert_eq!(read_entry(&path, "word/styles.xml"), "<w:styles/>");
}

#[test]
fn test_modify_empty_cell() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());

    docx::modify_cell(&path, 0, 1, 2, "first line\nsecond line").unwrap();
    assert_eq!(
        docx::read_cell(&path, 0, 1, 2).unwrap(),
        "first line\nsecond line"
    );
}

#[test]
fn test_cell_edit_alignment() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());

    CellEdit::new("right")
        .with_alignment(Alignment::Right)
        .apply(&path, 0, 0, 0)
        .unwrap();

    assert_eq!(docx::read_cell(&path, 0, 0, 0).unwrap(), "right");
    assert!(read_entry(&path, "word/document.xml").contains(r#"<w:jc w:val="right"/>"#));
}

#[test]
fn test_modify_cell_out_of_range_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = roster(dir.path());
    let before = fs::read(&path).unwrap();

    assert!(matches!(
        docx::modify_cell(&path, 0, 3, 0, "x"),
        Err(Error::CellOutOfRange { row: 3, .. })
    ));
    assert!(matches!(
        docx::modify_cell(&path, 0, 0, 7, "x"),
        Err(Error::CellOutOfRange { column: 7, .. })
    ));
    assert!(matches!(
        docx::modify_cell(&path, 2, 0, 0, "x"),
        Err(Error::TableOutOfRange { index: 2, count: 2 })
    ));

    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_merged_cell_edit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("merged.docx");
    let body = concat!(
        "<w:tbl><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid>",
        "<w:tr><w:tc><w:tcPr><w:gridSpan w:val=\"2\"/></w:tcPr><w:p><w:r><w:t>Header</w:t></w:r></w:p></w:tc></w:tr>",
        "<w:tr><w:tc><w:p><w:r><w:t>a</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>b</w:t></w:r></w:p></w:tc></w:tr>",
        "</w:tbl>"
    );
    write_docx(&path, body);

    assert_eq!(
        docx::extract_column(&path, 1).unwrap(),
        vec!["Header", "b"]
    );

    docx::modify_cell(&path, 0, 0, 1, "Title").unwrap();
    assert_eq!(
        docx::extract_column(&path, 0).unwrap(),
        vec!["Title", "a"]
    );
}

#[test]
fn test_not_a_docx() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fake.docx");
    fs::write(&path, "not a zip archive").unwrap();

    assert!(matches!(
        docx::extract_column(&path, 0),
        Err(Error::NotADocx(_))
    ));
    assert!(matches!(
        docx::modify_cell(&path, 0, 0, 0, "x"),
        Err(Error::NotADocx(_))
    ));
}
