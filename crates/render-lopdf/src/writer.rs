//! Assembles recorded page canvases into a `lopdf::Document`.
use crate::canvas::{PageCanvas, SurfaceCapabilities};
use crate::error::RenderError;
use crate::fonts::StandardFont;
use crosspatch_types::geometry::mm_to_pt;
use crosspatch_types::Size;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use serde::{Deserialize, Serialize};

/// Output conformance target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PdfProfile {
    /// PDF 1.7 with transparency.
    #[default]
    Standard,
    /// PDF/X-3 print exchange. PDF 1.3, no transparency.
    PdfX3,
}

impl PdfProfile {
    pub fn version(&self) -> &'static str {
        match self {
            PdfProfile::Standard => "1.7",
            PdfProfile::PdfX3 => "1.3",
        }
    }

    pub fn capabilities(&self) -> SurfaceCapabilities {
        SurfaceCapabilities {
            transparency: matches!(self, PdfProfile::Standard),
        }
    }
}

/// Values for the document information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub creator: String,
    /// `YYYY-MM-DD`; written as a PDF date when present.
    pub date: Option<String>,
}

pub struct PdfWriter {
    document: Document,
    profile: PdfProfile,
    info: DocumentInfo,
    pages_id: ObjectId,
    fonts_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl PdfWriter {
    pub fn new(profile: PdfProfile, info: DocumentInfo) -> Self {
        let mut document = Document::with_version(profile.version());
        let pages_id = document.new_object_id();

        let mut fonts = Dictionary::new();
        for font in StandardFont::ALL {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(font.resource_name(), font_id);
        }
        let fonts_id = document.add_object(fonts);

        Self {
            document,
            profile,
            info,
            pages_id,
            fonts_id,
            page_ids: Vec::new(),
        }
    }

    /// A blank canvas matching this profile's capabilities.
    pub fn new_canvas(&self, size: Size) -> PageCanvas {
        PageCanvas::new(size, self.profile.capabilities())
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Appends `canvas` as the next page.
    pub fn add_page(&mut self, canvas: PageCanvas) -> Result<ObjectId, RenderError> {
        let size = canvas.size();
        let (content, ext_gstates) = canvas.into_parts();
        let content_id = self
            .document
            .add_object(Stream::new(dictionary! {}, content.encode()?));

        let mut resources = dictionary! { "Font" => self.fonts_id };
        if !ext_gstates.is_empty() {
            let mut states = Dictionary::new();
            for (name, alpha) in ext_gstates {
                states.set(
                    name.into_bytes(),
                    dictionary! {
                        "Type" => "ExtGState",
                        "ca" => alpha,
                        "CA" => alpha,
                    },
                );
            }
            resources.set("ExtGState", states);
        }

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.into(), 0.into(), mm_to_pt(size.width).into(), mm_to_pt(size.height).into()],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        log::debug!("Added page {} ({:.0} x {:.0} mm)", self.page_ids.len(), size.width, size.height);
        Ok(page_id)
    }

    /// Writes the page tree, catalog and info dictionary.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        self.document.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => self.page_ids.len() as i64,
            }),
        );

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        let mut info = dictionary! {
            "Title" => text_string(&self.info.title),
            "Subject" => text_string(&self.info.subject),
            "Creator" => text_string(&self.info.creator),
            "Producer" => text_string(&self.info.creator),
        };
        if let Some(date) = self.info.date.as_deref().and_then(pdf_date) {
            info.set("CreationDate", Object::string_literal(date));
        }
        if self.profile == PdfProfile::PdfX3 {
            info.set("GTS_PDFXVersion", Object::string_literal("PDF/X-3:2002"));
            info.set("Trapped", "False");
        }
        let info_id = self.document.add_object(info);
        self.document.trailer.set("Info", info_id);

        self.document
    }
}

/// A PDF text string: literal for ASCII, UTF-16BE with BOM otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

/// `2024-05-01` → `D:20240501`.
fn pdf_date(date: &str) -> Option<String> {
    let digits: String = date.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == 8).then(|| format!("D:{}", digits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::TextStyle;
    use crosspatch_types::{Color, Rect};
    use lopdf::content::Content;

    fn info() -> DocumentInfo {
        DocumentInfo {
            title: "Pattern – AI".into(),
            subject: "Cross-stitch chart".into(),
            creator: "Crosspatch".into(),
            date: Some("2024-05-01".into()),
        }
    }

    fn reload(document: Document) -> Document {
        let mut document = document;
        let mut bytes = Vec::new();
        document.save_to(&mut bytes).unwrap();
        Document::load_mem(&bytes).unwrap()
    }

    #[test]
    fn profile_versions_and_capabilities() {
        assert_eq!(PdfProfile::Standard.version(), "1.7");
        assert!(PdfProfile::Standard.capabilities().transparency);
        assert_eq!(PdfProfile::PdfX3.version(), "1.3");
        assert!(!PdfProfile::PdfX3.capabilities().transparency);
    }

    #[test]
    fn pages_round_trip_through_lopdf() {
        let mut writer = PdfWriter::new(PdfProfile::Standard, info());
        for _ in 0..2 {
            let mut canvas = writer.new_canvas(Size::new(210.0, 297.0));
            canvas.fill_rect(Rect::new(10.0, 10.0, 5.0, 5.0), Color::BLACK);
            canvas.text(20.0, 20.0, "Hello", TextStyle::regular(10.0, Color::BLACK));
            writer.add_page(canvas).unwrap();
        }
        assert_eq!(writer.page_count(), 2);

        let doc = reload(writer.finish());
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);
        let first = *pages.get(&1).unwrap();
        let content = Content::decode(&doc.get_page_content(first).unwrap()).unwrap();
        assert!(content.operations.iter().any(|op| op.operator == "Tj"));
    }

    #[test]
    fn translucent_pages_carry_ext_gstate_resources() {
        let mut writer = PdfWriter::new(PdfProfile::Standard, info());
        let mut canvas = writer.new_canvas(Size::new(210.0, 297.0));
        canvas.set_opacity(0.12).unwrap();
        let page_id = writer.add_page(canvas).unwrap();
        let doc = writer.finish();

        let page = doc.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let states = resources.get(b"ExtGState").unwrap().as_dict().unwrap();
        let gs = states.get(b"GS120").unwrap().as_dict().unwrap();
        assert!((gs.get(b"ca").unwrap().as_float().unwrap() - 0.12).abs() < 1e-6);
    }

    #[test]
    fn pdfx3_sets_version_and_conformance_key() {
        let writer = PdfWriter::new(PdfProfile::PdfX3, info());
        let doc = writer.finish();
        assert_eq!(doc.version, "1.3");
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info = doc.get_dictionary(info_id).unwrap();
        assert!(info.has(b"GTS_PDFXVersion"));
        assert_eq!(
            info.get(b"CreationDate").unwrap().as_str().unwrap(),
            b"D:20240501"
        );
    }

    #[test]
    fn non_ascii_titles_use_utf16() {
        match text_string("Motif é") {
            Object::String(bytes, StringFormat::Hexadecimal) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(pdf_date("2024-05-01").as_deref(), Some("D:20240501"));
        assert_eq!(pdf_date("soon"), None);
    }
}
