#![allow(dead_code)]

use crosspatch::glyph::FontDescriptor;
use crosspatch::types::ThreadColor;
use crosspatch::{GeneratorBuilder, PatternDocument, PatternGenerator};
use lopdf::content::Content;
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub const PIXEL5_JSON: &str = include_str!("../../demos/pixel5.json");

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn pixel5() -> FontDescriptor {
    FontDescriptor::from_json(PIXEL5_JSON).expect("demo font parses")
}

pub fn black() -> ThreadColor {
    ThreadColor::from_hex("310", "Black", "#000000").expect("valid hex")
}

pub fn generator() -> PatternGenerator {
    GeneratorBuilder::new()
        .with_fixed_date("2024-05-01")
        .build()
        .expect("default configuration is valid")
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_pattern(pattern: &mut PatternDocument) -> Result<Self, Box<dyn std::error::Error>> {
        let bytes = pattern.to_bytes()?;
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Decoded content operations of a 1-based page.
    pub fn page_content(&self, page: u32) -> Result<Content, Box<dyn std::error::Error>> {
        let pages = self.doc.get_pages();
        let id = pages.get(&page).ok_or("no such page")?;
        Ok(Content::decode(&self.doc.get_page_content(*id)?)?)
    }

    /// All text shown on a page, decoded lossily from WinAnsi.
    pub fn page_text(&self, page: u32) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        Ok(self
            .page_content(page)?
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands.first()?.as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect())
    }

    pub fn page_has_operator(&self, page: u32, operator: &str) -> bool {
        self.page_content(page)
            .map(|c| c.operations.iter().any(|op| op.operator == operator))
            .unwrap_or(false)
    }

    /// Page size in points.
    pub fn media_box(&self, page: u32) -> Result<(f32, f32), Box<dyn std::error::Error>> {
        let pages = self.doc.get_pages();
        let id = pages.get(&page).ok_or("no such page")?;
        let dict = self.doc.get_dictionary(*id)?;
        let mbox = dict.get(b"MediaBox")?.as_array()?;
        Ok((mbox[2].as_float()?, mbox[3].as_float()?))
    }

    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}
