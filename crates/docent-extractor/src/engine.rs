//! Engine seams used by the extraction policy
//!
//! The policy in [`crate::DocumentExtractor`] only talks to these traits; the
//! default implementations are `LopdfTextLayer`, `PdftoppmRasterizer` and
//! `TesseractEngine`.

use crate::error::ExtractorError;
use std::path::{Path, PathBuf};

/// Reads the embedded text layer of a PDF
pub trait PdfTextLayer: Send + Sync {
    /// Native text of every page, in page order (one entry per page)
    fn page_texts(&self, pdf_path: &Path) -> Result<Vec<String>, ExtractorError>;
}

/// Renders PDF pages to raster images
pub trait PageRasterizer: Send + Sync {
    /// Render every page into `output_dir`, returning image paths in page order
    fn rasterize(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, ExtractorError>;
}

/// Optical character recognition over one image
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in the image at `image_path`
    fn recognize(&self, image_path: &Path) -> Result<String, ExtractorError>;
}
