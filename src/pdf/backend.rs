//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface for the few PDF operations text
//! extraction needs, isolating the concrete PDF library (lopdf).

use std::collections::BTreeMap;

use lopdf::Document as LopdfDocument;

use crate::error::{Error, Result};

/// Page identifier: (object number, generation number).
pub type PageId = (u32, u16);

/// Abstract interface for PDF document access.
pub trait PdfBackend {
    /// Return all pages as (page_number → PageId), ordered by page number.
    fn pages(&self) -> BTreeMap<u32, PageId>;

    /// Extract the text of a single page (1-based page number).
    fn page_text(&self, page_number: u32) -> Result<String>;

    /// Get PDF version string.
    fn version(&self) -> String;
}

/// Concrete [`PdfBackend`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(Error::from)?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(Error::from)?;
        Ok(Self { doc })
    }
}

impl PdfBackend for LopdfBackend {
    fn pages(&self) -> BTreeMap<u32, PageId> {
        self.doc.get_pages()
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        let pages = self.doc.get_pages();
        if !pages.contains_key(&page_number) {
            return Err(Error::PageOutOfRange(page_number, pages.len() as u32));
        }
        self.doc
            .extract_text(&[page_number])
            .map_err(|e| Error::TextExtract(format!("Page {}: {}", page_number, e)))
    }

    fn version(&self) -> String {
        self.doc.version.to_string()
    }
}
