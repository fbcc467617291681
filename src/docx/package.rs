//! Reading and replacing parts of a DOCX (OPC/ZIP) package.

use std::fs::{self, File};
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::detect::ensure_zip;
use crate::error::{Error, Result};

/// Main document part of a Word package.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the buffer reserved up front for a part.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// Read one part of a package into memory.
pub fn read_part(path: &Path, part: &str) -> Result<Vec<u8>> {
    ensure_zip(path)?;
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;
    let mut entry = archive
        .by_name(part)
        .map_err(|e| missing_part(e, path, part))?;

    // The declared size comes from the archive itself.
    let mut data = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}

/// Replace one part of a package on disk.
///
/// Every other entry is copied without recompression. The new archive is
/// written next to the original and then moved over it, so a failure leaves
/// the original untouched.
pub fn replace_part(path: &Path, part: &str, data: &[u8]) -> Result<()> {
    let source = fs::read(path)?;
    let mut archive = ZipArchive::new(Cursor::new(source))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;

    {
        let mut writer = ZipWriter::new(tmp.as_file_mut());
        let mut replaced = false;

        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i)?;
            if entry.name() == part {
                let method = match entry.compression() {
                    CompressionMethod::Stored => CompressionMethod::Stored,
                    _ => CompressionMethod::Deflated,
                };
                writer.start_file(part, SimpleFileOptions::default().compression_method(method))?;
                writer.write_all(data)?;
                replaced = true;
            } else {
                writer.raw_copy_file(entry)?;
            }
        }

        if !replaced {
            return Err(Error::NotADocx(format!(
                "{} has no {}",
                path.display(),
                part
            )));
        }
        writer.finish()?;
    }

    tmp.as_file().sync_all()?;
    fs::set_permissions(tmp.path(), fs::metadata(path)?.permissions())?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    log::debug!("Rewrote {} in {}", part, path.display());
    Ok(())
}

fn missing_part(err: ZipError, path: &Path, part: &str) -> Error {
    match err {
        ZipError::FileNotFound => {
            Error::NotADocx(format!("{} has no {}", path.display(), part))
        }
        other => Error::Zip(other),
    }
}
