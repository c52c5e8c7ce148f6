//! Branded page furniture: header band, footer and the preview watermark.
use crate::canvas::{PageCanvas, TextAlign, TextStyle};
use crate::context::{PageHeader, RenderContext};
use crosspatch_types::{Color, Rect};

/// Longest pattern excerpt shown in the header, ellipsis included.
pub const EXCERPT_MAX_CHARS: usize = 24;
pub const FONT_NAME_MAX_CHARS: usize = 32;

const HEADER_BAR_HEIGHT_MM: f32 = 11.0;
const HEADER_PADDING_MM: f32 = 4.0;
const FOOTER_RULE_OFFSET_MM: f32 = 4.5;
const FOOTER_TEXT_OFFSET_MM: f32 = 1.2;

const WATERMARK_ALPHA: f32 = 0.12;
const WATERMARK_ANGLE_DEG: f32 = 35.0;
const WATERMARK_SIZE_PT: f32 = 40.0;
const WATERMARK_STEP_X_MM: f32 = 95.0;
const WATERMARK_STEP_Y_MM: f32 = 70.0;

/// Shortens `text` to at most `max_chars` characters, replacing the tail
/// with `…` when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Text color that stays readable on `background`.
pub fn contrasting_ink(background: Color) -> Color {
    if background.is_dark() {
        Color::WHITE
    } else {
        Color::gray(34)
    }
}

/// A pale tint of `color`, `strength` of the way from white.
pub fn tint(color: Color, strength: f32) -> Color {
    let mix = |c: u8| (255.0 - (255.0 - c as f32) * strength).round() as u8;
    Color::rgb(mix(color.r), mix(color.g), mix(color.b))
}

pub fn draw_header(canvas: &mut PageCanvas, ctx: &RenderContext, header: &PageHeader) {
    let band = ctx.geometry.header_rect();
    let bar = Rect::new(band.x, band.y, band.width, HEADER_BAR_HEIGHT_MM);
    let accent = ctx.branding.accent;
    let ink = contrasting_ink(accent);
    canvas.fill_rect(bar, accent);

    let left = bar.x + HEADER_PADDING_MM;
    let right = bar.right() - HEADER_PADDING_MM;
    let first_line = bar.y + 4.8;
    let second_line = bar.y + 9.2;

    canvas.text(left, first_line, &ctx.branding.name, TextStyle::bold(10.0, ink));

    let page_label = format!(
        "{} {} / {}",
        ctx.localizer.tr("header.page", "Page"),
        header.page_number,
        header.total_pages
    );
    canvas.text(
        right,
        first_line,
        &page_label,
        TextStyle::bold(9.0, ink).aligned(TextAlign::Right),
    );

    let excerpt = format!(
        "“{}”",
        truncate_with_ellipsis(header.pattern_text, EXCERPT_MAX_CHARS)
    );
    canvas.text(left, second_line, &excerpt, TextStyle::regular(7.5, ink));

    let details = format!(
        "{} · {} × {} {}",
        truncate_with_ellipsis(header.font_name, FONT_NAME_MAX_CHARS),
        header.pattern_width,
        header.pattern_height,
        ctx.localizer.tr("header.stitches", "stitches")
    );
    canvas.text(
        right,
        second_line,
        &details,
        TextStyle::regular(7.5, ink).aligned(TextAlign::Right),
    );
}

pub fn draw_footer(canvas: &mut PageCanvas, ctx: &RenderContext) {
    let band = ctx.geometry.footer_rect();
    let rule_y = band.bottom() - FOOTER_RULE_OFFSET_MM;
    let baseline = band.bottom() - FOOTER_TEXT_OFFSET_MM;

    canvas.line(band.x, rule_y, band.right(), rule_y, ctx.branding.accent, 0.3);

    let tagline = ctx.localizer.tr("footer.tagline", &ctx.branding.tagline);
    let muted = TextStyle::regular(7.0, Color::gray(110));
    canvas.text(band.x, baseline, &tagline, muted);
    canvas.text(
        band.right(),
        baseline,
        &ctx.date,
        muted.aligned(TextAlign::Right),
    );
}

/// How the watermark ended up being painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatermarkMode {
    /// Accent-colored text at low constant alpha.
    Translucent,
    /// Pale outlined text, for surfaces without transparency.
    OpaqueFallback,
}

/// Tiles the brand watermark diagonally across the whole page.
pub fn draw_watermark(canvas: &mut PageCanvas, ctx: &RenderContext) -> WatermarkMode {
    let label = format!(
        "{} · {}",
        ctx.localizer.tr("watermark.preview", &ctx.branding.watermark_text),
        ctx.branding.name
    );
    let accent = ctx.branding.accent;

    canvas.save_state();
    let (mode, style, outline) = match canvas.set_opacity(WATERMARK_ALPHA) {
        Ok(()) => (
            WatermarkMode::Translucent,
            TextStyle::bold(WATERMARK_SIZE_PT, accent),
            false,
        ),
        Err(err) => {
            log::debug!("{}; drawing an opaque watermark instead", err);
            canvas.set_line_width(0.2);
            (
                WatermarkMode::OpaqueFallback,
                TextStyle::bold(WATERMARK_SIZE_PT, tint(accent, 0.3)),
                true,
            )
        }
    };

    let size = canvas.size();
    let mut row = 0;
    let mut cy = WATERMARK_STEP_Y_MM / 2.0;
    while cy < size.height {
        // Offset alternate rows so the repeats read as a lattice.
        let mut cx = if row % 2 == 0 {
            WATERMARK_STEP_X_MM / 2.0
        } else {
            WATERMARK_STEP_X_MM
        };
        while cx < size.width + WATERMARK_STEP_X_MM / 2.0 {
            canvas.rotated_text(cx, cy, WATERMARK_ANGLE_DEG, &label, style, outline);
            cx += WATERMARK_STEP_X_MM;
        }
        cy += WATERMARK_STEP_Y_MM;
        row += 1;
    }
    canvas.restore_state();
    mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::SurfaceCapabilities;
    use crate::context::Branding;
    use crosspatch_types::{Localizer, Margins, Orientation, PageFormat, PageGeometry, UnitSystem};

    fn with_ctx<R>(f: impl FnOnce(&RenderContext) -> R) -> R {
        let branding = Branding::default();
        let localizer = Localizer::untranslated();
        let ctx = RenderContext {
            geometry: PageGeometry::new(PageFormat::A4, Orientation::Portrait, Margins::all(10.0)),
            branding: &branding,
            localizer: &localizer,
            units: UnitSystem::Metric,
            date: "2024-05-01".to_string(),
        };
        f(&ctx)
    }

    fn shown_text(canvas: &PageCanvas) -> Vec<String> {
        canvas
            .operations()
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands[0].as_str().ok())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }

    #[test]
    fn truncation_keeps_prefix_and_adds_ellipsis() {
        let short = truncate_with_ellipsis("Hello World", 5);
        assert_eq!(short.chars().count(), 5);
        assert_eq!(short, "Hell…");
        assert_eq!(truncate_with_ellipsis("Hi", 5), "Hi");
        assert_eq!(truncate_with_ellipsis("Hello", 5), "Hello");
    }

    #[test]
    fn header_shows_page_counter_and_excerpt() {
        with_ctx(|ctx| {
            let mut canvas = PageCanvas::new(
                ctx.geometry.size,
                SurfaceCapabilities { transparency: true },
            );
            let header = PageHeader {
                pattern_text: "A very long pattern text that must be cut",
                font_name: "Pixel 5",
                pattern_width: 120,
                pattern_height: 7,
                page_number: 2,
                total_pages: 4,
            };
            draw_header(&mut canvas, ctx, &header);
            let texts = shown_text(&canvas);
            assert!(texts.iter().any(|t| t == "Crosspatch"));
            assert!(texts.iter().any(|t| t == "Page 2 / 4"));
            assert!(texts.iter().any(|t| t.contains("Pixel 5") && t.contains("120")));
        });
    }

    #[test]
    fn footer_shows_date() {
        with_ctx(|ctx| {
            let mut canvas = PageCanvas::new(
                ctx.geometry.size,
                SurfaceCapabilities { transparency: true },
            );
            draw_footer(&mut canvas, ctx);
            assert!(shown_text(&canvas).iter().any(|t| t == "2024-05-01"));
        });
    }

    #[test]
    fn watermark_uses_alpha_when_available() {
        with_ctx(|ctx| {
            let mut canvas = PageCanvas::new(
                ctx.geometry.size,
                SurfaceCapabilities { transparency: true },
            );
            assert_eq!(draw_watermark(&mut canvas, ctx), WatermarkMode::Translucent);
            assert!(!canvas.ext_gstates().is_empty());
        });
    }

    #[test]
    fn watermark_falls_back_without_alpha() {
        with_ctx(|ctx| {
            let mut canvas = PageCanvas::new(
                ctx.geometry.size,
                SurfaceCapabilities { transparency: false },
            );
            assert_eq!(draw_watermark(&mut canvas, ctx), WatermarkMode::OpaqueFallback);
            assert!(canvas.ext_gstates().is_empty());
            assert!(canvas.operations().iter().any(|op| op.operator == "Tr"));
        });
    }

    #[test]
    fn tint_moves_towards_white() {
        let pale = tint(Color::rgb(0, 100, 200), 0.25);
        assert!(pale.r > 180 && pale.g > 180 && pale.b > 200);
        assert!(pale.luminance() > 0.75);
    }
}
