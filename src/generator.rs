use crate::config::{GeneratorBuilder, GeneratorConfig};
use crate::error::PatternError;
use crate::filename::pattern_filename;
use crosspatch_glyph::{compose, FontDescriptor};
use crosspatch_layout::{plan_pages, LayoutPlan};
use crosspatch_render_lopdf::{
    draw_footer, draw_grid_page, draw_header, draw_watermark, render_legend, render_upsell_page,
    truncate_with_ellipsis, DocumentInfo, LegendData, PageCanvas, PageHeader, PdfWriter,
    RenderContext, RevealPolicy, WatermarkMode,
};
use crosspatch_types::{FabricCount, Orientation, PageGeometry, ThreadColor};
use lopdf::Document;
use std::fs;
use std::path::{Path, PathBuf};

/// One build's inputs, all chosen by the caller.
#[derive(Debug, Clone, Copy)]
pub struct PatternRequest<'a> {
    pub text: &'a str,
    pub font: Option<&'a FontDescriptor>,
    pub thread: Option<&'a ThreadColor>,
    /// Stitches per inch of the target fabric.
    pub fabric_count: f64,
    pub orientation: Orientation,
    /// Preview documents get a watermark, a redacted legend and an upsell page.
    pub preview: bool,
}

impl<'a> PatternRequest<'a> {
    pub fn new(text: &'a str, font: &'a FontDescriptor, thread: &'a ThreadColor) -> Self {
        Self {
            text,
            font: Some(font),
            thread: Some(thread),
            ..Default::default()
        }
    }

    pub fn with_fabric_count(mut self, count: f64) -> Self {
        self.fabric_count = count;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_preview(mut self, preview: bool) -> Self {
        self.preview = preview;
        self
    }
}

impl Default for PatternRequest<'_> {
    fn default() -> Self {
        Self {
            text: "",
            font: None,
            thread: None,
            fabric_count: FabricCount::default().get(),
            orientation: Orientation::Portrait,
            preview: false,
        }
    }
}

/// A finished pattern document plus the statistics callers display.
#[derive(Debug)]
pub struct PatternDocument {
    pub document: Document,
    pub filename: String,
    pub page_count: usize,
    pub grid_pages: usize,
    pub stitch_count: usize,
    pub pattern_width: usize,
    pub pattern_height: usize,
    /// How the watermark was painted; `None` for paid documents.
    pub watermark: Option<WatermarkMode>,
}

impl PatternDocument {
    pub fn to_bytes(&mut self) -> Result<Vec<u8>, PatternError> {
        let mut bytes = Vec::new();
        self.document.save_to(&mut bytes)?;
        Ok(bytes)
    }

    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PatternError> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Writes the document into `dir` under its derived file name.
    pub fn save_in_dir<P: AsRef<Path>>(&mut self, dir: P) -> Result<PathBuf, PatternError> {
        let path = dir.as_ref().join(&self.filename);
        self.save(&path)?;
        Ok(path)
    }
}

/// Builds pattern documents from text. Holds only immutable configuration,
/// so one generator can serve any number of builds.
#[derive(Debug, Clone)]
pub struct PatternGenerator {
    config: GeneratorConfig,
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl PatternGenerator {
    pub(crate) fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds the grid pages and legend for `request`.
    ///
    /// Returns `Ok(None)` when there is nothing to stitch: blank text, no
    /// font or thread selected, an unusable fabric count, or text whose
    /// glyphs produce an empty bitmap.
    pub fn generate(&self, request: &PatternRequest) -> Result<Option<PatternDocument>, PatternError> {
        if request.text.trim().is_empty() {
            log::info!("Pattern text is empty; nothing to generate.");
            return Ok(None);
        }
        let Some(font) = request.font else {
            log::info!("No font selected; nothing to generate.");
            return Ok(None);
        };
        let Some(thread) = request.thread else {
            log::info!("No thread color selected; nothing to generate.");
            return Ok(None);
        };
        let Some(fabric) = FabricCount::new(request.fabric_count) else {
            log::warn!("Rejected fabric count {}.", request.fabric_count);
            return Ok(None);
        };

        let bitmap = compose(request.text, Some(font));
        if bitmap.is_empty() {
            log::info!("Text '{}' produced an empty bitmap with font '{}'.", request.text, font.name);
            return Ok(None);
        }
        let (width, height) = (bitmap.width(), bitmap.height());
        let stitch_count = bitmap.stitch_count();

        let config = &self.config;
        let geometry = PageGeometry::new(config.page_format, request.orientation, config.margins);
        let cell_size = fabric.cell_size_mm();
        let plan = plan_pages(width, height, cell_size, geometry.usable_size());
        let total_pages = plan.total_pages + if request.preview { 2 } else { 1 };

        let date = config.render_date();
        let ctx = RenderContext {
            geometry,
            branding: &config.branding,
            localizer: &config.localizer,
            units: config.units(),
            date: date.clone(),
        };
        let (pattern_text, font_name) = (request.text, font.name.as_str());
        let header = move |page_number: usize| PageHeader {
            pattern_text,
            font_name,
            pattern_width: width,
            pattern_height: height,
            page_number,
            total_pages,
        };

        let mut writer = PdfWriter::new(config.profile, document_info(config, request.text, date));
        let mut watermark = None;

        for tile in plan.tiles(width, height) {
            let mut canvas = writer.new_canvas(geometry.size);
            let summary = draw_grid_page(&mut canvas, &ctx, &bitmap, &plan, &tile, cell_size, thread);
            log::debug!(
                "Grid page {} covers cols {}..{} rows {}..{} ({} stitches).",
                tile.index + 1,
                tile.start_col,
                tile.start_col + tile.cols,
                tile.start_row,
                tile.start_row + tile.rows,
                summary.filled_cells
            );
            watermark = finish_page(&mut canvas, &ctx, &header(tile.index + 1), request.preview).or(watermark);
            writer.add_page(canvas)?;
        }

        let legend = LegendData {
            pattern_text: request.text,
            font_name: &font.name,
            pattern_width: width,
            pattern_height: height,
            stitch_count,
            fabric,
            thread,
            grid_pages: plan.total_pages,
        };
        let mut canvas = writer.new_canvas(geometry.size);
        render_legend(&mut canvas, &ctx, &legend, RevealPolicy::for_preview(request.preview));
        finish_page(&mut canvas, &ctx, &header(plan.total_pages + 1), request.preview);
        writer.add_page(canvas)?;

        if request.preview {
            let mut canvas = writer.new_canvas(geometry.size);
            render_upsell_page(&mut canvas, &ctx);
            finish_page(&mut canvas, &ctx, &header(plan.total_pages + 2), false);
            writer.add_page(canvas)?;
        }

        let page_count = writer.page_count();
        log_summary(request, &plan, width, height, stitch_count, page_count);

        Ok(Some(PatternDocument {
            document: writer.finish(),
            filename: pattern_filename(request.text, &font.name),
            page_count,
            grid_pages: plan.total_pages,
            stitch_count,
            pattern_width: width,
            pattern_height: height,
            watermark,
        }))
    }
}

/// Adds the chrome every page shares, plus the watermark when asked.
fn finish_page(
    canvas: &mut PageCanvas,
    ctx: &RenderContext,
    header: &PageHeader,
    watermark: bool,
) -> Option<WatermarkMode> {
    draw_header(canvas, ctx, header);
    draw_footer(canvas, ctx);
    watermark.then(|| draw_watermark(canvas, ctx))
}

fn document_info(config: &GeneratorConfig, text: &str, date: String) -> DocumentInfo {
    DocumentInfo {
        title: format!("{} – {}", config.branding.name, truncate_with_ellipsis(text, 60)),
        subject: config.localizer.tr("document.subject", "Cross-stitch pattern"),
        creator: config.branding.name.clone(),
        date: Some(date),
    }
}

fn log_summary(
    request: &PatternRequest,
    plan: &LayoutPlan,
    width: usize,
    height: usize,
    stitch_count: usize,
    page_count: usize,
) {
    log::info!(
        "Built {} pattern: {}x{} stitches ({} filled) on {} pages ({}x{} grid, {}).",
        if request.preview { "preview" } else { "full" },
        width,
        height,
        stitch_count,
        page_count,
        plan.pages_x,
        plan.pages_y,
        match request.orientation {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    );
}

/// One-shot convenience over a default-configured [`PatternGenerator`].
pub fn build_pattern(
    text: &str,
    font: Option<&FontDescriptor>,
    thread: Option<&ThreadColor>,
    fabric_count: f64,
    orientation: Orientation,
    preview: bool,
) -> Result<Option<PatternDocument>, PatternError> {
    PatternGenerator::default().generate(&PatternRequest {
        text,
        font,
        thread,
        fabric_count,
        orientation,
        preview,
    })
}
