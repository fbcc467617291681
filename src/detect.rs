//! Input sniffing by leading magic bytes.
//!
//! PDF inputs start with `%PDF-x.y`. Word documents are OPC packages, i.e.
//! ZIP archives, and start with a local file header.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Bytes read from the start of a file; enough for either signature.
const SNIFF_LEN: u64 = 16;

/// What the first bytes of an input say it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// PDF document with its declared `major.minor` version
    Pdf { version: String },
    /// ZIP container, possibly a DOCX package
    Zip,
}

/// Classify a byte buffer by its leading signature.
///
/// Returns [`Error::UnknownFormat`] for anything that is neither a PDF nor a
/// ZIP container, and [`Error::UnsupportedVersion`] for a PDF header whose
/// version is not `digit.digit`.
pub fn sniff_bytes(data: &[u8]) -> Result<FileKind> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(FileKind::Zip);
    }

    let rest = data.strip_prefix(PDF_MAGIC).ok_or(Error::UnknownFormat)?;
    match rest {
        [major, b'.', minor, ..] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(FileKind::Pdf {
                version: format!("{}.{}", *major as char, *minor as char),
            })
        }
        [a, b, c, ..] => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(&[*a, *b, *c]).into_owned(),
        )),
        _ => Err(Error::UnknownFormat),
    }
}

/// Classify a file by its first bytes.
pub fn sniff_path<P: AsRef<Path>>(path: P) -> Result<FileKind> {
    let mut header = Vec::new();
    File::open(path.as_ref())?
        .take(SNIFF_LEN)
        .read_to_end(&mut header)?;
    sniff_bytes(&header)
}

/// Require a PDF header and return its version.
pub fn ensure_pdf_bytes(data: &[u8]) -> Result<String> {
    match sniff_bytes(data)? {
        FileKind::Pdf { version } => Ok(version),
        FileKind::Zip => Err(Error::UnknownFormat),
    }
}

/// File variant of [`ensure_pdf_bytes`].
pub fn ensure_pdf<P: AsRef<Path>>(path: P) -> Result<String> {
    match sniff_path(path)? {
        FileKind::Pdf { version } => Ok(version),
        FileKind::Zip => Err(Error::UnknownFormat),
    }
}

/// Require a ZIP header.
///
/// Only the container is checked here; whether the package holds a Word
/// document is verified when its main part is opened.
pub fn ensure_zip<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    match sniff_path(path) {
        Ok(FileKind::Zip) => Ok(()),
        Ok(FileKind::Pdf { .. }) | Err(Error::UnknownFormat | Error::UnsupportedVersion(_)) => {
            Err(Error::NotADocx(format!(
                "{} is not a ZIP package",
                path.display()
            )))
        }
        Err(e) => Err(e),
    }
}
