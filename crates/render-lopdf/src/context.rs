use crosspatch_types::{Color, Localizer, PageGeometry, UnitSystem};

/// Brand identity stamped onto every page.
#[derive(Debug, Clone, PartialEq)]
pub struct Branding {
    pub name: String,
    pub tagline: String,
    pub accent: Color,
    pub watermark_text: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            name: "Crosspatch".to_string(),
            tagline: "Pixel-perfect cross-stitch charts".to_string(),
            accent: Color::rgb(0xB0, 0x3A, 0x5B),
            watermark_text: "PREVIEW".to_string(),
        }
    }
}

/// Everything page renderers share within one document build.
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub geometry: PageGeometry,
    pub branding: &'a Branding,
    pub localizer: &'a Localizer,
    pub units: UnitSystem,
    /// Render date, already formatted as `YYYY-MM-DD`.
    pub date: String,
}

/// Per-page data shown in the header band.
#[derive(Debug, Clone, PartialEq)]
pub struct PageHeader<'a> {
    pub pattern_text: &'a str,
    pub font_name: &'a str,
    pub pattern_width: usize,
    pub pattern_height: usize,
    pub page_number: usize,
    pub total_pages: usize,
}
