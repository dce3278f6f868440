//! Extraction result types

use serde::{Deserialize, Serialize};

/// Which path produced the extracted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Embedded PDF text layer
    NativeText,
    /// PDF pages rendered to images and recognized
    RasterOcr,
    /// Direct OCR of an uploaded image
    ImageOcr,
    /// Media type with no extraction path
    Unsupported,
    /// A parse, raster or OCR step failed; text is empty
    Failed,
}

impl ExtractionMethod {
    /// Get the method name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::NativeText => "native_text",
            ExtractionMethod::RasterOcr => "raster_ocr",
            ExtractionMethod::ImageOcr => "image_ocr",
            ExtractionMethod::Unsupported => "unsupported",
            ExtractionMethod::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text plus how it was obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// Extracted text, possibly empty
    pub text: String,
    /// Path that produced `text`
    pub method: ExtractionMethod,
    /// Number of PDF pages seen, when the input was a PDF that could be read
    pub page_count: Option<usize>,
}

impl ExtractionOutcome {
    pub(crate) fn new(text: String, method: ExtractionMethod, page_count: Option<usize>) -> Self {
        Self {
            text,
            method,
            page_count,
        }
    }

    pub(crate) fn empty(method: ExtractionMethod) -> Self {
        Self::new(String::new(), method, None)
    }
}
