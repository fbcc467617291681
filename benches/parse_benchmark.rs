//! Benchmarks for docproc hot paths.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover name filtering and table parsing with synthetic data.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docproc::docx::parse_tables;
use docproc::NameFilter;

/// Creates a synthetic `word/document.xml` with one table of the given size.
fn create_document_xml(rows: usize, columns: usize) -> Vec<u8> {
    let mut xml = String::from(
        r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );
    xml.push_str("<w:tbl><w:tblGrid>");
    for _ in 0..columns {
        xml.push_str("<w:gridCol/>");
    }
    xml.push_str("</w:tblGrid>");
    for r in 0..rows {
        xml.push_str("<w:tr>");
        for c in 0..columns {
            xml.push_str(&format!(
                "<w:tc><w:p><w:r><w:t>Row {} column {}</w:t></w:r></w:p></w:tc>",
                r, c
            ));
        }
        xml.push_str("</w:tr>");
    }
    xml.push_str("</w:tbl></w:body></w:document>");
    xml.into_bytes()
}

fn create_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}_보고서_{}_final_{}.docx", 2000 + i % 30, i % 7, i))
        .collect()
}

fn bench_parse_tables(c: &mut Criterion) {
    let small = create_document_xml(10, 4);
    let large = create_document_xml(500, 8);

    c.bench_function("parse_tables_10x4", |b| {
        b.iter(|| parse_tables(black_box(&small)).unwrap())
    });

    c.bench_function("parse_tables_500x8", |b| {
        b.iter(|| parse_tables(black_box(&large)).unwrap())
    });
}

fn bench_name_filter(c: &mut Criterion) {
    let names = create_names(1000);
    let filter = NameFilter::new().require("2024").require("보고서").exclude("draft");
    let raw = filter.clone().with_unicode_normalization(false);

    c.bench_function("name_filter_nfc_1000", |b| {
        b.iter(|| names.iter().filter(|n| filter.matches(black_box(n))).count())
    });

    c.bench_function("name_filter_raw_1000", |b| {
        b.iter(|| names.iter().filter(|n| raw.matches(black_box(n))).count())
    });
}

criterion_group!(benches, bench_parse_tables, bench_name_filter);
criterion_main!(benches);
