//! Native PDF text layer via lopdf

use crate::engine::PdfTextLayer;
use crate::error::ExtractorError;
use lopdf::Document;
use std::path::Path;
use tracing::{debug, warn};

/// Reads each page's embedded text with `lopdf`
///
/// A page whose text cannot be decoded contributes an empty string rather
/// than failing the document, so a partly broken text layer still falls
/// through to the OCR tier when nothing else is found.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfTextLayer;

impl LopdfTextLayer {
    /// Create a new text layer reader
    pub fn new() -> Self {
        Self
    }
}

impl PdfTextLayer for LopdfTextLayer {
    fn page_texts(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractorError> {
        let doc = Document::load(pdf_path)?;
        let pages = doc.get_pages();

        debug!("Loaded PDF {:?} with {} pages", pdf_path, pages.len());

        let texts = pages
            .keys()
            .map(|&page_num| match doc.extract_text(&[page_num]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Failed to decode text of page {} in {:?}: {}", page_num, pdf_path, e);
                    String::new()
                }
            })
            .collect();

        Ok(texts)
    }
}
