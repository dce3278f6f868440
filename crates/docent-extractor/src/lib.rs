//! Docent Extractor
//!
//! Turns an uploaded file into plain text.
//!
//! # Overview
//!
//! Extraction dispatches on the declared media type:
//!
//! ```text
//! application/pdf ─→ text layer ─(empty)─→ pdftoppm ─→ tesseract per page
//! image/*         ─→ tesseract
//! anything else   ─→ ""
//! ```
//!
//! Extraction never fails outward. A fault in any engine is logged at `error`
//! with `outcome = "failed"` and the caller receives an empty string.
//!
//! # Example Usage
//!
//! ```no_run
//! use docent_domain::traits::TextExtractor;
//! use docent_extractor::{DefaultExtractor, ExtractorConfig};
//! use std::path::Path;
//!
//! let extractor = DefaultExtractor::from_config(ExtractorConfig::default());
//! let text = extractor.extract(Path::new("media/documents/1/scan.pdf"), "application/pdf");
//! println!("{}", text);
//! ```

#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod extractor;
mod ocr;
mod pdf;
mod raster;
mod types;

#[cfg(test)]
mod testing;

pub use config::ExtractorConfig;
pub use engine::{OcrEngine, PageRasterizer, PdfTextLayer};
pub use error::ExtractorError;
pub use extractor::{DefaultExtractor, DocumentExtractor};
pub use ocr::TesseractEngine;
pub use pdf::LopdfTextLayer;
pub use raster::PdftoppmRasterizer;
pub use types::{ExtractionMethod, ExtractionOutcome};
