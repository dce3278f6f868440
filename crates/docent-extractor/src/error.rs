//! Error types for the Extractor
//!
//! These never leave the crate through `extract`: the extractor logs them and
//! degrades to an empty result.

use thiserror::Error;

/// Errors raised by a parse, raster or OCR step
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The PDF structure could not be read
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Rendering pages to images failed
    #[error("Rasterization failed: {0}")]
    Raster(String),

    /// Optical character recognition failed
    #[error("OCR failed: {0}")]
    Ocr(String),

    /// A required external program is not installed
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<lopdf::Error> for ExtractorError {
    fn from(e: lopdf::Error) -> Self {
        ExtractorError::Pdf(e.to_string())
    }
}

/// Run an external program and capture stdout, mapping a missing binary to
/// `ToolNotFound` and a non-zero exit to `on_failure(stderr)`.
pub(crate) fn command_stdout(
    result: std::io::Result<std::process::Output>,
    tool_name: &str,
    on_failure: impl FnOnce(String) -> ExtractorError,
) -> Result<String, ExtractorError> {
    match result {
        Ok(output) if output.status.success() => {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(on_failure(format!("{} failed: {}", tool_name, stderr.trim())))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractorError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractorError::Io(e)),
    }
}
