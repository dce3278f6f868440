//! Test fixtures: in-memory PDFs, rendered text images and scripted engines

use crate::engine::{OcrEngine, PageRasterizer, PdfTextLayer};
use crate::error::ExtractorError;
use image::{GrayImage, Luma};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Build a PDF with one page per entry; `None` produces a blank page
pub(crate) fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let operations = match page {
            Some(text) => vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
            None => Vec::new(),
        };
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().unwrap(),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// 5x7 bitmap glyphs, one string per row, for the letters the OCR tests use
fn glyph(c: char) -> [&'static str; 7] {
    match c {
        'H' => ["#...#", "#...#", "#...#", "#####", "#...#", "#...#", "#...#"],
        'E' => ["#####", "#....", "#....", "####.", "#....", "#....", "#####"],
        'L' => ["#....", "#....", "#....", "#....", "#....", "#....", "#####"],
        'O' => [".###.", "#...#", "#...#", "#...#", "#...#", "#...#", ".###."],
        'W' => ["#...#", "#...#", "#...#", "#.#.#", "#.#.#", "##.##", "#...#"],
        'R' => ["####.", "#...#", "#...#", "####.", "#.#..", "#..#.", "#...#"],
        'D' => ["####.", "#...#", "#...#", "#...#", "#...#", "#...#", "####."],
        _ => ["....."; 7],
    }
}

/// Render `text` as large black capitals on a white background
pub(crate) fn render_banner(text: &str) -> GrayImage {
    const SCALE: u32 = 8;
    const MARGIN: u32 = 40;
    const ADVANCE: u32 = 6;

    let chars: Vec<char> = text.chars().collect();
    let width = MARGIN * 2 + chars.len() as u32 * ADVANCE * SCALE;
    let height = MARGIN * 2 + 7 * SCALE;
    let mut img = GrayImage::from_pixel(width, height, Luma([255u8]));

    for (i, c) in chars.iter().enumerate() {
        let origin_x = MARGIN + i as u32 * ADVANCE * SCALE;
        for (row, bits) in glyph(*c).iter().enumerate() {
            for (col, bit) in bits.chars().enumerate() {
                if bit != '#' {
                    continue;
                }
                for dy in 0..SCALE {
                    for dx in 0..SCALE {
                        let x = origin_x + col as u32 * SCALE + dx;
                        let y = MARGIN + row as u32 * SCALE + dy;
                        img.put_pixel(x, y, Luma([0u8]));
                    }
                }
            }
        }
    }

    img
}

/// Text layer returning canned page texts
#[derive(Clone)]
pub(crate) struct FakeTextLayer {
    pages: Result<Vec<String>, String>,
    calls: Arc<Mutex<usize>>,
}

impl FakeTextLayer {
    pub fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: Ok(pages.iter().map(|p| p.to_string()).collect()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            pages: Err(message.to_string()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl PdfTextLayer for FakeTextLayer {
    fn page_texts(&self, _pdf_path: &Path) -> Result<Vec<String>, ExtractorError> {
        *self.calls.lock().unwrap() += 1;
        self.pages.clone().map_err(ExtractorError::Pdf)
    }
}

/// Rasterizer that "renders" `pages` empty image files
#[derive(Clone)]
pub(crate) struct FakeRasterizer {
    pages: usize,
    fail: bool,
    calls: Arc<Mutex<usize>>,
}

impl FakeRasterizer {
    pub fn with_pages(pages: usize) -> Self {
        Self {
            pages,
            fail: false,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            pages: 0,
            fail: true,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl PageRasterizer for FakeRasterizer {
    fn rasterize(&self, _pdf_path: &Path, output_dir: &Path) -> Result<Vec<PathBuf>, ExtractorError> {
        *self.calls.lock().unwrap() += 1;
        if self.fail {
            return Err(ExtractorError::Raster("renderer crashed".to_string()));
        }

        (1..=self.pages)
            .map(|n| {
                let path = output_dir.join(format!("page-{}.png", n));
                std::fs::write(&path, b"")?;
                Ok(path)
            })
            .collect()
    }
}

/// OCR engine answering "text of <file stem>" and recording every image it saw
#[derive(Clone)]
pub(crate) struct FakeOcr {
    fail_on: Option<String>,
    seen: Arc<Mutex<Vec<PathBuf>>>,
}

impl FakeOcr {
    pub fn new() -> Self {
        Self {
            fail_on: None,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fail when asked to recognize the image whose file stem is `stem`
    pub fn failing_on(stem: &str) -> Self {
        Self {
            fail_on: Some(stem.to_string()),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen_stems(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .filter_map(|p| p.file_stem().and_then(|s| s.to_str()).map(String::from))
            .collect()
    }
}

impl OcrEngine for FakeOcr {
    fn recognize(&self, image_path: &Path) -> Result<String, ExtractorError> {
        self.seen.lock().unwrap().push(image_path.to_path_buf());

        let stem = image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        if self.fail_on.as_deref() == Some(stem.as_str()) {
            return Err(ExtractorError::Ocr(format!("could not read {}", stem)));
        }
        Ok(format!("text of {}", stem))
    }
}
