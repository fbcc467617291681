//! Page-ordered text extraction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::detect::{ensure_pdf, ensure_pdf_bytes};
use crate::error::{Error, Result};

use super::backend::{LopdfBackend, PdfBackend};
use super::options::{ErrorMode, ExtractOptions, PageSelection};

/// Text of a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// Page number (1-indexed)
    pub number: u32,
    /// Extracted text
    pub text: String,
}

/// Extract plain text from a PDF file.
///
/// Pages are concatenated in page order with no separator. Any failure
/// (missing file, not a PDF, corrupt structure, undecodable page) is logged
/// and yields an empty string.
///
/// # Example
///
/// ```no_run
/// let text = docproc::pdf::extract_text("report.pdf");
/// if text.is_empty() {
///     eprintln!("nothing extracted");
/// }
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    match try_extract_text(path, &ExtractOptions::default()) {
        Ok(text) => text,
        Err(e) => {
            log::warn!("PDF read failed for {}: {}", path.display(), e);
            String::new()
        }
    }
}

/// Extract plain text from a PDF file, reporting failures.
pub fn try_extract_text<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<String> {
    let pages = extract_page_texts(path, options)?;
    Ok(join_pages(&pages, &options.page_separator))
}

/// Extract the text of every selected page of a PDF file.
pub fn extract_page_texts<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<Vec<PageText>> {
    let path = path.as_ref();
    ensure_pdf(path)?;
    let backend = LopdfBackend::load_file(path)?;
    log::debug!(
        "Loaded {} (PDF {}, {} pages)",
        path.display(),
        backend.version(),
        backend.pages().len()
    );
    extract_from_backend(&backend, options)
}

/// Extract plain text from an in-memory PDF.
pub fn extract_text_from_bytes(data: &[u8], options: &ExtractOptions) -> Result<String> {
    ensure_pdf_bytes(data)?;
    let backend = LopdfBackend::load_bytes(data)?;
    let pages = extract_from_backend(&backend, options)?;
    Ok(join_pages(&pages, &options.page_separator))
}

/// Extract the selected pages from any [`PdfBackend`].
pub fn extract_from_backend<B: PdfBackend + ?Sized>(
    backend: &B,
    options: &ExtractOptions,
) -> Result<Vec<PageText>> {
    let pages = backend.pages();
    let total = pages.len() as u32;

    if let PageSelection::Pages(requested) = &options.pages {
        if let Some(&missing) = requested.iter().find(|p| !pages.contains_key(p)) {
            match options.error_mode {
                ErrorMode::Strict => return Err(Error::PageOutOfRange(missing, total)),
                ErrorMode::Lenient => {
                    log::warn!("Page {} requested but document has {} pages", missing, total)
                }
            }
        }
    }

    let mut result = Vec::new();
    for &number in pages.keys() {
        if !options.pages.includes(number) {
            continue;
        }

        match backend.page_text(number) {
            Ok(text) => {
                log::debug!("Page {}: {} chars", number, text.len());
                result.push(PageText { number, text });
            }
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Skipping page {}: {}", number, e);
            }
            Err(e) => return Err(e),
        }
    }

    Ok(result)
}

/// Concatenate page texts in order.
pub fn join_pages(pages: &[PageText], separator: &str) -> String {
    pages
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
