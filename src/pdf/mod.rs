//! PDF text extraction module.

mod backend;
mod extractor;
mod options;

pub use backend::{LopdfBackend, PageId, PdfBackend};
pub use extractor::{
    extract_from_backend, extract_page_texts, extract_text, extract_text_from_bytes, join_pages,
    try_extract_text, PageText,
};
pub use options::{ErrorMode, ExtractOptions, PageSelection};
