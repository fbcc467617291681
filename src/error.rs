//! Error types for docproc library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docproc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing documents and directories.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted and cannot be read.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// The file is not a Word (.docx) package.
    #[error("Not a DOCX package: {0}")]
    NotADocx(String),

    /// Error reading or writing the ZIP container.
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Malformed WordprocessingML.
    #[error("XML error: {0}")]
    Xml(String),

    /// Table index is out of range.
    #[error("Table {index} is out of range (document has {count} tables)")]
    TableOutOfRange { index: usize, count: usize },

    /// Cell coordinates are out of range.
    #[error("Cell ({row}, {column}) is out of range (table has {rows} rows and {columns} columns)")]
    CellOutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },

    /// A search or rename pattern was empty.
    #[error("Pattern must not be empty")]
    EmptyPattern,

    /// Renaming would replace an existing entry.
    #[error("Cannot rename {} to {}: destination already exists", from.display(), to.display())]
    RenameCollision { from: PathBuf, to: PathBuf },

    /// Renaming would produce an unusable name.
    #[error("Cannot rename {}: {reason}", path.display())]
    InvalidRename { path: PathBuf, reason: String },

    /// The external converter failed on a document.
    #[error("Failed to convert {}: {message}", path.display())]
    Conversion { path: PathBuf, message: String },
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}
