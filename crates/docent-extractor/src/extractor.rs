//! Core extraction policy

use crate::config::ExtractorConfig;
use crate::engine::{OcrEngine, PageRasterizer, PdfTextLayer};
use crate::error::ExtractorError;
use crate::ocr::TesseractEngine;
use crate::pdf::LopdfTextLayer;
use crate::raster::PdftoppmRasterizer;
use crate::types::{ExtractionMethod, ExtractionOutcome};
use docent_domain::traits::TextExtractor;
use docent_domain::MediaKind;
use std::path::Path;
use tempfile::TempDir;
use tracing::{debug, error, info};

/// The production extractor: lopdf text layer, pdftoppm, tesseract
pub type DefaultExtractor = DocumentExtractor<LopdfTextLayer, PdftoppmRasterizer, TesseractEngine>;

/// Pulls plain text out of an uploaded file
///
/// PDFs are read through their text layer first; a PDF whose pages carry no
/// text is rendered page by page and recognized with OCR. Images go straight
/// to OCR. Anything else yields an empty string without touching an engine.
pub struct DocumentExtractor<T, R, O>
where
    T: PdfTextLayer,
    R: PageRasterizer,
    O: OcrEngine,
{
    text_layer: T,
    rasterizer: R,
    ocr: O,
    config: ExtractorConfig,
}

impl DefaultExtractor {
    /// Build the production extractor from configuration
    pub fn from_config(config: ExtractorConfig) -> Self {
        let rasterizer = PdftoppmRasterizer::new(config.raster_dpi);
        let ocr = TesseractEngine::new(config.tesseract_language.clone());
        DocumentExtractor::new(LopdfTextLayer::new(), rasterizer, ocr, config)
    }
}

impl Default for DefaultExtractor {
    fn default() -> Self {
        Self::from_config(ExtractorConfig::default())
    }
}

impl<T, R, O> DocumentExtractor<T, R, O>
where
    T: PdfTextLayer,
    R: PageRasterizer,
    O: OcrEngine,
{
    /// Create an extractor over explicit engines
    pub fn new(text_layer: T, rasterizer: R, ocr: O, config: ExtractorConfig) -> Self {
        Self {
            text_layer,
            rasterizer,
            ocr,
            config,
        }
    }

    /// Extract text and report which path produced it
    ///
    /// Never fails: a fault in any engine is logged and yields an empty
    /// outcome with [`ExtractionMethod::Failed`].
    pub fn extract_detailed(&self, path: &Path, media_type: &str) -> ExtractionOutcome {
        let kind = MediaKind::from_media_type(media_type);

        let result = match kind {
            MediaKind::Pdf => self.extract_pdf(path),
            MediaKind::Image => self.extract_image(path),
            MediaKind::Unsupported => {
                debug!(
                    path = ?path,
                    media_type,
                    outcome = "unsupported",
                    "Skipping extraction for unsupported media type"
                );
                return ExtractionOutcome::empty(ExtractionMethod::Unsupported);
            }
        };

        match result {
            Ok(outcome) => {
                if outcome.text.trim().is_empty() {
                    info!(
                        path = ?path,
                        media_kind = kind.as_str(),
                        method = %outcome.method,
                        outcome = "empty",
                        "No text found in document"
                    );
                } else {
                    info!(
                        path = ?path,
                        media_kind = kind.as_str(),
                        method = %outcome.method,
                        chars = outcome.text.chars().count(),
                        "Extracted text"
                    );
                }
                outcome
            }
            Err(e) => {
                error!(
                    path = ?path,
                    media_kind = kind.as_str(),
                    outcome = "failed",
                    error = %e,
                    "Text extraction failed"
                );
                ExtractionOutcome::empty(ExtractionMethod::Failed)
            }
        }
    }

    fn extract_pdf(&self, path: &Path) -> Result<ExtractionOutcome, ExtractorError> {
        let pages = self.text_layer.page_texts(path)?;
        let page_count = pages.len();

        let native = pages.join(&self.config.page_separator);
        if !native.trim().is_empty() {
            return Ok(ExtractionOutcome::new(
                native,
                ExtractionMethod::NativeText,
                Some(page_count),
            ));
        }

        if page_count == 0 {
            return Ok(ExtractionOutcome::new(
                String::new(),
                ExtractionMethod::NativeText,
                Some(0),
            ));
        }

        debug!("PDF {:?} has no text layer, falling back to OCR of {} pages", path, page_count);

        let workdir = TempDir::new()?;
        let images = self.rasterizer.rasterize(path, workdir.path())?;

        let mut page_texts = Vec::with_capacity(images.len());
        for image in &images {
            page_texts.push(self.ocr.recognize(image)?);
        }

        Ok(ExtractionOutcome::new(
            page_texts.join(&self.config.page_separator),
            ExtractionMethod::RasterOcr,
            Some(page_count),
        ))
    }

    fn extract_image(&self, path: &Path) -> Result<ExtractionOutcome, ExtractorError> {
        let text = self.ocr.recognize(path)?;
        Ok(ExtractionOutcome::new(text, ExtractionMethod::ImageOcr, None))
    }
}

impl<T, R, O> TextExtractor for DocumentExtractor<T, R, O>
where
    T: PdfTextLayer,
    R: PageRasterizer,
    O: OcrEngine,
{
    fn extract(&self, path: &Path, media_type: &str) -> String {
        self.extract_detailed(path, media_type).text
    }
}
