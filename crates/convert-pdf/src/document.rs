//! Loading PDFs with lopdf.

use std::path::Path;

use lopdf::Document;

use convert_core::error::{ConvertError, Result};

/// Load a PDF, mapping any parse failure to `DocumentOpen`.
pub fn load(path: &Path) -> Result<Document> {
    Document::load(path).map_err(|e| ConvertError::DocumentOpen {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Page numbers in document order. lopdf numbers pages from 1.
pub fn page_numbers(doc: &Document) -> Vec<u32> {
    // get_pages() is a BTreeMap keyed by page number, so keys are ascending.
    doc.get_pages().keys().copied().collect()
}
