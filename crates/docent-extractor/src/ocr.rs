//! Tesseract OCR engine
//!
//! Uses the `tesseract` command-line program, writing recognized text to
//! stdout.

use crate::engine::OcrEngine;
use crate::error::{command_stdout, ExtractorError};
use std::path::Path;
use std::process::Command;

/// OCR via the `tesseract` binary
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    program: String,
    language: String,
}

impl TesseractEngine {
    /// Create an engine recognizing `language` (e.g. "eng")
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            program: "tesseract".to_string(),
            language: language.into(),
        }
    }

    /// Use a different executable (name or path)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Whether the tesseract binary can be started
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .is_ok_and(|o| o.status.success())
    }
}

impl Default for TesseractEngine {
    fn default() -> Self {
        Self::new("eng")
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, image_path: &Path) -> Result<String, ExtractorError> {
        let output = Command::new(&self.program)
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        command_stdout(output, &self.program, ExtractorError::Ocr)
    }
}
