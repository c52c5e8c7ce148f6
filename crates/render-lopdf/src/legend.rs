//! The materials legend page and the preview upsell page.
//!
//! A single renderer draws both the full legend and the redacted preview.
//! [`RevealPolicy`] decides, field by field, whether the real value or a
//! fixed-width mask bar is painted; positions come from [`LegendLayout`]
//! and never depend on the policy.
use crate::canvas::{PageCanvas, TextAlign, TextStyle};
use crate::chrome::{
    contrasting_ink, tint, truncate_with_ellipsis, EXCERPT_MAX_CHARS, FONT_NAME_MAX_CHARS,
};
use crate::context::RenderContext;
use crosspatch_types::fabric::{CUT_MARGIN_IN, RECOMMENDED_STRANDS};
use crosspatch_types::{Color, Dimensions, FabricCount, Rect, ThreadColor, ThreadUsage};

const MASK_COLOR: Color = Color::gray(205);
const MASK_HEIGHT_MM: f32 = 3.2;
const MASK_SHORT_MM: f32 = 12.0;
const MASK_LONG_MM: f32 = 28.0;

const RULE_COLOR: Color = Color::gray(190);
const HEADER_FILL: Color = Color::gray(236);
const TEXT_COLOR: Color = Color::gray(34);
const MUTED_COLOR: Color = Color::gray(100);

const TABLE_HEADER_HEIGHT_MM: f32 = 8.0;
const TABLE_ROW_HEIGHT_MM: f32 = 13.0;
const INFO_LINE_MM: f32 = 5.5;
const INFO_LINES: usize = 5;
const SIZE_BOX_HEIGHT_MM: f32 = 22.0;
const NOTE_BOX_HEIGHT_MM: f32 = 42.0;

/// Which legend fields show their real values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPolicy {
    pub thread_identity: bool,
    pub thread_length: bool,
    pub skeins: bool,
    pub finished_size: bool,
    pub cut_size: bool,
    /// Replace the stitching tips with the upgrade call to action.
    pub call_to_action: bool,
}

impl RevealPolicy {
    pub const FULL: RevealPolicy = RevealPolicy {
        thread_identity: true,
        thread_length: true,
        skeins: true,
        finished_size: true,
        cut_size: true,
        call_to_action: false,
    };

    pub const REDACTED: RevealPolicy = RevealPolicy {
        thread_identity: false,
        thread_length: false,
        skeins: false,
        finished_size: false,
        cut_size: false,
        call_to_action: true,
    };

    pub fn for_preview(preview: bool) -> Self {
        if preview { Self::REDACTED } else { Self::FULL }
    }
}

/// Everything the legend reports about one pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendData<'a> {
    pub pattern_text: &'a str,
    pub font_name: &'a str,
    pub pattern_width: usize,
    pub pattern_height: usize,
    pub stitch_count: usize,
    pub fabric: FabricCount,
    pub thread: &'a ThreadColor,
    pub grid_pages: usize,
}

impl LegendData<'_> {
    pub fn usage(&self) -> ThreadUsage {
        ThreadUsage::estimate(self.stitch_count, self.fabric)
    }

    pub fn finished_size(&self) -> Dimensions {
        Dimensions::finished(self.pattern_width, self.pattern_height, self.fabric)
    }
}

/// Positions of the legend's blocks inside the content area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendLayout {
    pub title_baseline: f32,
    pub subtitle_baseline: f32,
    pub table: Rect,
    /// X positions of the six table columns.
    pub columns: [f32; 6],
    pub info: Rect,
    pub finished_box: Rect,
    pub cut_box: Rect,
    pub note_box: Rect,
}

impl LegendLayout {
    pub fn within(content: Rect) -> Self {
        let x = content.x;
        let w = content.width;
        let table = Rect::new(
            x,
            content.y + 22.0,
            w,
            TABLE_HEADER_HEIGHT_MM + TABLE_ROW_HEIGHT_MM,
        );
        let column = |fraction: f32| x + w * fraction;
        let columns = [
            column(0.02),
            column(0.13),
            column(0.27),
            column(0.55),
            column(0.70),
            column(0.88),
        ];
        let info = Rect::new(
            x,
            table.bottom() + 8.0,
            w,
            8.0 + INFO_LINES as f32 * INFO_LINE_MM,
        );
        let box_width = (w - 6.0) / 2.0;
        let boxes_y = info.bottom() + 6.0;
        let finished_box = Rect::new(x, boxes_y, box_width, SIZE_BOX_HEIGHT_MM);
        let cut_box = Rect::new(x + box_width + 6.0, boxes_y, box_width, SIZE_BOX_HEIGHT_MM);
        let note_y = finished_box.bottom() + 6.0;
        // Short pages (A4 landscape) shrink the note box down to the content edge.
        let note_height = (content.bottom() - note_y).clamp(0.0, NOTE_BOX_HEIGHT_MM);
        let note_box = Rect::new(x, note_y, w, note_height);

        Self {
            title_baseline: content.y + 8.0,
            subtitle_baseline: content.y + 14.0,
            table,
            columns,
            info,
            finished_box,
            cut_box,
            note_box,
        }
    }
}

/// A neutral bar standing in for a hidden value. Its width never depends on
/// the value it hides.
fn mask_bar(canvas: &mut PageCanvas, x: f32, baseline: f32, width: f32) {
    canvas.fill_rect(
        Rect::new(x, baseline - MASK_HEIGHT_MM + 0.6, width, MASK_HEIGHT_MM),
        MASK_COLOR,
    );
}

fn value_or_mask(
    canvas: &mut PageCanvas,
    reveal: bool,
    x: f32,
    baseline: f32,
    value: &str,
    style: TextStyle,
    mask_width: f32,
) {
    if reveal {
        canvas.text(x, baseline, value, style);
    } else {
        mask_bar(canvas, x, baseline, mask_width);
    }
}

/// Draws the legend page body and returns where everything went.
pub fn render_legend(
    canvas: &mut PageCanvas,
    ctx: &RenderContext,
    data: &LegendData,
    policy: RevealPolicy,
) -> LegendLayout {
    let layout = LegendLayout::within(ctx.geometry.content_rect());
    let tr = |key: &str, fallback: &str| ctx.localizer.tr(key, fallback);

    canvas.text(
        layout.table.x,
        layout.title_baseline,
        &tr("legend.title", "Materials & Legend"),
        TextStyle::bold(16.0, TEXT_COLOR),
    );
    let subtitle = format!(
        "“{}” · {} · {} × {} {}",
        truncate_with_ellipsis(data.pattern_text, EXCERPT_MAX_CHARS),
        truncate_with_ellipsis(data.font_name, FONT_NAME_MAX_CHARS),
        data.pattern_width,
        data.pattern_height,
        tr("header.stitches", "stitches"),
    );
    canvas.text(
        layout.table.x,
        layout.subtitle_baseline,
        &subtitle,
        TextStyle::regular(9.0, MUTED_COLOR),
    );

    draw_thread_table(canvas, ctx, &layout, data, policy);
    draw_pattern_info(canvas, ctx, &layout, data);
    draw_size_boxes(canvas, ctx, &layout, data, policy);
    if policy.call_to_action {
        draw_call_to_action(canvas, ctx, layout.note_box);
    } else {
        draw_tips(canvas, ctx, layout.note_box);
    }
    layout
}

fn draw_thread_table(
    canvas: &mut PageCanvas,
    ctx: &RenderContext,
    layout: &LegendLayout,
    data: &LegendData,
    policy: RevealPolicy,
) {
    let table = layout.table;
    let cols = layout.columns;
    let header = Rect::new(table.x, table.y, table.width, TABLE_HEADER_HEIGHT_MM);
    canvas.fill_rect(header, HEADER_FILL);

    let header_style = TextStyle::bold(8.0, TEXT_COLOR);
    let header_baseline = header.y + 5.4;
    let titles = [
        ctx.localizer.tr("legend.col.swatch", "Color"),
        ctx.localizer.tr("legend.col.code", "Code"),
        ctx.localizer.tr("legend.col.name", "Name"),
        ctx.localizer.tr("legend.col.stitches", "Stitches"),
        ctx.localizer.tr("legend.col.length", "Length"),
        ctx.localizer.tr("legend.col.skeins", "Skeins"),
    ];
    for (x, title) in cols.iter().zip(titles.iter()) {
        canvas.text(*x, header_baseline, title, header_style);
    }

    let row_y = header.bottom();
    let baseline = row_y + TABLE_ROW_HEIGHT_MM / 2.0 + 1.2;
    let swatch = Rect::new(cols[0], row_y + 2.5, 12.0, TABLE_ROW_HEIGHT_MM - 5.0);
    canvas.fill_rect(swatch, data.thread.color());
    canvas.stroke_rect(swatch, RULE_COLOR, 0.2);

    let style = TextStyle::regular(9.0, TEXT_COLOR);
    let usage = data.usage();
    value_or_mask(
        canvas,
        policy.thread_identity,
        cols[1],
        baseline,
        &data.thread.code,
        TextStyle::bold(9.0, TEXT_COLOR),
        MASK_SHORT_MM,
    );
    let name_width = (cols[3] - cols[2] - 3.0).max(MASK_SHORT_MM);
    value_or_mask(
        canvas,
        policy.thread_identity,
        cols[2],
        baseline,
        &fit_to_width(&data.thread.name, style, name_width),
        style,
        MASK_LONG_MM.min(name_width),
    );
    canvas.text(cols[3], baseline, &data.stitch_count.to_string(), style);
    value_or_mask(
        canvas,
        policy.thread_length,
        cols[4],
        baseline,
        &ctx.units.format_length(usage.meters),
        TextStyle::regular(7.5, TEXT_COLOR),
        MASK_LONG_MM.min(cols[5] - cols[4] - 2.0),
    );
    value_or_mask(
        canvas,
        policy.skeins,
        cols[5],
        baseline,
        &usage.skeins.to_string(),
        style,
        MASK_SHORT_MM.min(table.right() - cols[5]),
    );

    canvas.line(table.x, table.bottom(), table.right(), table.bottom(), RULE_COLOR, 0.3);
}

/// Truncates `text` with an ellipsis until it fits in `width_mm`.
fn fit_to_width(text: &str, style: TextStyle, width_mm: f32) -> String {
    let mut max = text.chars().count();
    let mut fitted = text.to_string();
    while max > 1 && style.font.measure_mm(&fitted, style.size_pt) > width_mm {
        max -= 1;
        fitted = truncate_with_ellipsis(text, max);
    }
    fitted
}

fn draw_pattern_info(
    canvas: &mut PageCanvas,
    ctx: &RenderContext,
    layout: &LegendLayout,
    data: &LegendData,
) {
    let tr = |key: &str, fallback: &str| ctx.localizer.tr(key, fallback);
    let info = layout.info;
    canvas.text(
        info.x,
        info.y + 5.0,
        &tr("legend.details", "Pattern details"),
        TextStyle::bold(11.0, TEXT_COLOR),
    );

    let lines = [
        format!(
            "{}: {} × {} {}",
            tr("legend.design_size", "Design size"),
            data.pattern_width,
            data.pattern_height,
            tr("header.stitches", "stitches"),
        ),
        format!(
            "{}: {}-{}",
            tr("legend.fabric", "Fabric"),
            data.fabric.display(),
            tr("legend.count_aida", "count Aida"),
        ),
        format!(
            "{}: {}",
            tr("legend.total_stitches", "Total stitches"),
            data.stitch_count
        ),
        format!(
            "{}: {} {}",
            tr("legend.strands", "Strands"),
            RECOMMENDED_STRANDS,
            tr("legend.strands_hint", "strands of floss for full coverage"),
        ),
        format!(
            "{}: {}",
            tr("legend.chart_pages", "Chart pages"),
            data.grid_pages
        ),
    ];
    let style = TextStyle::regular(9.0, TEXT_COLOR);
    for (i, line) in lines.iter().enumerate() {
        let baseline = info.y + 8.0 + (i as f32 + 1.0) * INFO_LINE_MM - 1.0;
        canvas.text(info.x + 2.0, baseline, "•", style);
        canvas.text(info.x + 6.0, baseline, line, style);
    }
}

fn draw_size_boxes(
    canvas: &mut PageCanvas,
    ctx: &RenderContext,
    layout: &LegendLayout,
    data: &LegendData,
    policy: RevealPolicy,
) {
    let finished = data.finished_size();
    let cut = finished.with_cut_margin();
    let cut_title = format!(
        "{} (+{} {})",
        ctx.localizer.tr("legend.cut_size", "Cut fabric"),
        ctx.units.format_inches(CUT_MARGIN_IN),
        ctx.localizer.tr("legend.per_side", "per side"),
    );

    let boxes = [
        (
            layout.finished_box,
            ctx.localizer.tr("legend.finished_size", "Finished size"),
            ctx.units.format_dimensions(&finished),
            policy.finished_size,
        ),
        (layout.cut_box, cut_title, ctx.units.format_dimensions(&cut), policy.cut_size),
    ];
    for (rect, title, value, reveal) in boxes {
        canvas.stroke_rect(rect, RULE_COLOR, 0.3);
        canvas.text(
            rect.x + 4.0,
            rect.y + 7.0,
            &title,
            TextStyle::bold(9.0, MUTED_COLOR),
        );
        value_or_mask(
            canvas,
            reveal,
            rect.x + 4.0,
            rect.y + 15.5,
            &value,
            TextStyle::regular(10.0, TEXT_COLOR),
            MASK_LONG_MM * 1.5,
        );
    }
}

fn draw_tips(canvas: &mut PageCanvas, ctx: &RenderContext, rect: Rect) {
    let tr = |key: &str, fallback: &str| ctx.localizer.tr(key, fallback);
    canvas.fill_rect(rect, tint(ctx.branding.accent, 0.08));
    canvas.text(
        rect.x + 5.0,
        rect.y + 8.0,
        &tr("legend.tips", "Stitching tips"),
        TextStyle::bold(11.0, TEXT_COLOR),
    );
    let tips = [
        tr("legend.tip.center", "Start from the center of the fabric and the chart."),
        tr("legend.tip.direction", "Keep every top stitch crossing in the same direction."),
        tr("legend.tip.scale", "Print at 100% scale and check the 10 mm bar on each page."),
        tr("legend.tip.tension", "Use an embroidery hoop to keep the fabric tension even."),
    ];
    let style = TextStyle::regular(9.0, TEXT_COLOR);
    for (i, tip) in tips.iter().enumerate() {
        let baseline = rect.y + 15.0 + i as f32 * 6.0;
        canvas.text(rect.x + 6.0, baseline, "•", style);
        canvas.text(rect.x + 10.0, baseline, tip, style);
    }
}

fn draw_call_to_action(canvas: &mut PageCanvas, ctx: &RenderContext, rect: Rect) {
    let tr = |key: &str, fallback: &str| ctx.localizer.tr(key, fallback);
    let accent = ctx.branding.accent;
    canvas.fill_rect(rect, tint(accent, 0.12));
    canvas.stroke_rect(rect, accent, 0.6);
    canvas.text(
        rect.x + 5.0,
        rect.y + 9.0,
        &tr("legend.cta.title", "Unlock the complete pattern"),
        TextStyle::bold(13.0, accent),
    );
    canvas.text(
        rect.x + 5.0,
        rect.y + 16.0,
        &tr(
            "legend.cta.body",
            "Thread code, quantities and exact fabric sizes are hidden in this preview.",
        ),
        TextStyle::regular(9.0, TEXT_COLOR),
    );
    draw_button(
        canvas,
        Rect::new(rect.x + 5.0, rect.y + 24.0, 70.0, 11.0),
        accent,
        &tr("legend.cta.button", "Get the full pattern"),
    );
}

fn draw_button(canvas: &mut PageCanvas, rect: Rect, fill: Color, label: &str) {
    canvas.fill_rect(rect, fill);
    canvas.text(
        rect.x + rect.width / 2.0,
        rect.y + rect.height / 2.0 + 1.5,
        label,
        TextStyle::bold(10.0, contrasting_ink(fill)).aligned(TextAlign::Center),
    );
}

/// The closing page of a preview: what the full pattern adds, and how to
/// get it.
pub fn render_upsell_page(canvas: &mut PageCanvas, ctx: &RenderContext) {
    let tr = |key: &str, fallback: &str| ctx.localizer.tr(key, fallback);
    let content = ctx.geometry.content_rect();
    let accent = ctx.branding.accent;
    let center = content.x + content.width / 2.0;

    canvas.text(
        center,
        content.y + 30.0,
        &tr("upsell.headline", "Your pattern is ready to stitch"),
        TextStyle::bold(20.0, TEXT_COLOR).aligned(TextAlign::Center),
    );
    canvas.text(
        center,
        content.y + 40.0,
        &tr(
            "upsell.subheadline",
            "This preview hides the details you need to get started.",
        ),
        TextStyle::regular(11.0, MUTED_COLOR).aligned(TextAlign::Center),
    );

    let benefits = [
        tr("upsell.benefit.thread", "Exact thread code and color name"),
        tr("upsell.benefit.quantity", "Thread length and number of skeins"),
        tr("upsell.benefit.size", "Finished and cut fabric sizes"),
        tr("upsell.benefit.clean", "Clean chart pages without watermark"),
        tr("upsell.benefit.print", "Print-ready at true 1:1 scale"),
    ];
    let panel = Rect::new(content.x + 20.0, content.y + 52.0, content.width - 40.0, 52.0);
    canvas.fill_rect(panel, tint(accent, 0.08));
    let style = TextStyle::regular(11.0, TEXT_COLOR);
    for (i, benefit) in benefits.iter().enumerate() {
        let baseline = panel.y + 11.0 + i as f32 * 8.5;
        canvas.text(panel.x + 8.0, baseline, "•", TextStyle::bold(11.0, accent));
        canvas.text(panel.x + 15.0, baseline, benefit, style);
    }

    let button_width = 90.0;
    draw_button(
        canvas,
        Rect::new(center - button_width / 2.0, panel.bottom() + 14.0, button_width, 14.0),
        accent,
        &tr("upsell.cta", "Get the full pattern"),
    );
    canvas.text(
        center,
        panel.bottom() + 38.0,
        &format!(
            "{} {}",
            ctx.branding.name,
            tr("upsell.footnote", "· every purchase includes all future format updates")
        ),
        TextStyle::regular(8.0, MUTED_COLOR).aligned(TextAlign::Center),
    );
}
