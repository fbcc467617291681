//! # docproc
//!
//! Office document batch utilities for Rust.
//!
//! This library bundles the small chores that come up when processing a
//! folder full of Word and PDF files: pulling text out of PDFs, finding files
//! by name, renaming folders, reading and editing Word tables, and batch
//! converting Word documents to PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docproc::{extract_column, extract_text, find_files, modify_cell, NameFilter};
//!
//! fn main() -> docproc::Result<()> {
//!     // Plain text of a PDF, empty on failure
//!     let text = extract_text("report.pdf");
//!     println!("{}", text);
//!
//!     // Files whose name contains every required substring
//!     let filter = NameFilter::new().require("2024").require("invoice");
//!     for name in find_files("./inbox", &filter)? {
//!         println!("{}", name);
//!     }
//!
//!     // Read and edit the first table of a Word document
//!     let names = extract_column("roster.docx", 0)?;
//!     println!("{:?}", names);
//!     modify_cell("roster.docx", 0, 1, 2, "done")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **PDF text**: page-ordered extraction with strict and lenient modes
//! - **Name search**: substring filters with Unicode normalization
//! - **Folder renaming**: depth-first substring removal with a report
//! - **Word tables**: merged-cell aware reads and in-place cell edits
//! - **PDF conversion**: batch runs through a pluggable converter

pub mod convert;
pub mod detect;
pub mod docx;
pub mod error;
pub mod files;
pub mod pdf;

// Re-export commonly used types
pub use convert::{
    batch_convert_to_pdf, plan_batch, run_batch, BatchJob, BatchOptions, BatchPlan, BatchReport,
    FileOutcome, LibreOfficeConverter, PdfConverter,
};
pub use detect::{sniff_bytes, sniff_path, FileKind};
pub use docx::{
    extract_column, modify_cell, read_cell, read_tables, Alignment, CellEdit, Table, TableCell,
    TableRow,
};
pub use error::{Error, Result};
pub use files::{find_files, rename_folders, EntryKind, NameFilter, RenameReport, RenamedDir};
pub use pdf::{
    extract_page_texts, extract_text, try_extract_text, ErrorMode, ExtractOptions, PageSelection,
    PageText,
};
