//! PDF page rasterization via pdftoppm (Poppler)

use crate::engine::PageRasterizer;
use crate::error::{command_stdout, ExtractorError};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Prefix pdftoppm gives every rendered page
const PAGE_PREFIX: &str = "page";

/// Renders every PDF page to PNG with the `pdftoppm` binary
#[derive(Debug, Clone)]
pub struct PdftoppmRasterizer {
    program: String,
    dpi: u32,
}

impl PdftoppmRasterizer {
    /// Create a rasterizer rendering at `dpi`
    pub fn new(dpi: u32) -> Self {
        Self {
            program: "pdftoppm".to_string(),
            dpi,
        }
    }

    /// Use a different executable (name or path)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

impl PageRasterizer for PdftoppmRasterizer {
    fn rasterize(&self, pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, ExtractorError> {
        let dpi = self.dpi.to_string();
        let output = Command::new(&self.program)
            .args(["-png", "-r", &dpi])
            .arg(pdf_path)
            .arg(output_dir.join(PAGE_PREFIX))
            .output();

        command_stdout(output, &self.program, ExtractorError::Raster)?;

        let images = collect_page_images(output_dir)?;
        debug!("Rendered {} pages of {:?} at {} DPI", images.len(), pdf_path, self.dpi);
        Ok(images)
    }
}

/// Find rendered page images in `dir`, ordered by page number.
///
/// pdftoppm names files `page-1.png`, `page-01.png` or `page-001.png`
/// depending on the page count, so ordering is numeric, not lexical.
pub(crate) fn collect_page_images(dir: &Path) -> Result<Vec<PathBuf>, ExtractorError> {
    let mut pages: Vec<(u32, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_png = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("png"));
        if !is_png {
            continue;
        }

        let page_num = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.strip_prefix(PAGE_PREFIX))
            .and_then(|s| s.strip_prefix('-'))
            .and_then(|n| n.parse::<u32>().ok());

        if let Some(page_num) = page_num {
            pages.push((page_num, path));
        }
    }

    pages.sort_by_key(|(page_num, _)| *page_num);
    Ok(pages.into_iter().map(|(_, path)| path).collect())
}
