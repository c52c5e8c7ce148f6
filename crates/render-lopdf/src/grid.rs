//! The stitch chart: one page's slice of the pattern drawn true to scale.
use crate::canvas::{PageCanvas, TextAlign, TextStyle};
use crate::context::RenderContext;
use crosspatch_glyph::PatternBitmap;
use crosspatch_layout::{LayoutPlan, PageTile};
use crosspatch_types::{Color, Rect, ThreadColor};

/// Cells smaller than this are filled without a cross mark.
pub const CROSS_MARK_MIN_CELL_MM: f32 = 1.5;
/// Bold grid lines and coordinate labels repeat every this many cells.
pub const MAJOR_LINE_INTERVAL: usize = 10;
/// Physical length of the scale-verification bar.
pub const SCALE_BAR_LENGTH_MM: f32 = 10.0;

const THIN_LINE_MM: f32 = 0.08;
const MAJOR_LINE_MM: f32 = 0.3;
const BORDER_LINE_MM: f32 = 0.5;
const THIN_LINE_COLOR: Color = Color::gray(170);
const MAJOR_LINE_COLOR: Color = Color::gray(40);

const LIGHT_MARK: Color = Color::WHITE;
const DARK_MARK: Color = Color::gray(34);

const LABEL_SIZE_PT: f32 = 5.5;
const LABEL_COLOR: Color = Color::gray(60);

const SCALE_BAR_GAP_MM: f32 = 4.0;
const SCALE_TICK_MM: f32 = 1.2;
const SCALE_TEXT_SIZE_PT: f32 = 6.0;

/// Cross mark color that stays visible on a cell filled with `thread`.
pub fn cross_mark_color(thread: Color) -> Color {
    if thread.is_dark() { LIGHT_MARK } else { DARK_MARK }
}

/// What was drawn for one grid page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPageSummary {
    /// The drawn grid region, in page millimeters.
    pub grid: Rect,
    pub filled_cells: usize,
    pub cross_marks: bool,
}

/// Draws `tile` of `bitmap` into the content area of the page.
pub fn draw_grid_page(
    canvas: &mut PageCanvas,
    ctx: &RenderContext,
    bitmap: &PatternBitmap,
    plan: &LayoutPlan,
    tile: &PageTile,
    cell_size_mm: f32,
    thread: &ThreadColor,
) -> GridPageSummary {
    let content = ctx.geometry.content_rect();
    let grid = Rect::new(
        content.x + plan.label_margin_left,
        content.y + plan.label_margin_top,
        tile.cols as f32 * cell_size_mm,
        tile.rows as f32 * cell_size_mm,
    );

    let cross_marks = cell_size_mm >= CROSS_MARK_MIN_CELL_MM;
    let filled_cells = draw_cells(canvas, bitmap, tile, grid, cell_size_mm, thread, cross_marks);
    draw_grid_lines(canvas, tile, grid, cell_size_mm);
    draw_coordinate_labels(canvas, tile, grid, cell_size_mm);
    draw_scale_bar(canvas, ctx, grid);

    GridPageSummary {
        grid,
        filled_cells,
        cross_marks,
    }
}

fn draw_cells(
    canvas: &mut PageCanvas,
    bitmap: &PatternBitmap,
    tile: &PageTile,
    grid: Rect,
    cell: f32,
    thread: &ThreadColor,
    cross_marks: bool,
) -> usize {
    let fill = thread.color();
    let mut filled = Vec::new();

    for r in 0..tile.rows {
        let row = tile.start_row + r;
        let y = grid.y + r as f32 * cell;
        let mut c = 0;
        while c < tile.cols {
            if !bitmap.get(row, tile.start_col + c) {
                c += 1;
                continue;
            }
            // Merge horizontal runs into one rectangle.
            let run_start = c;
            while c < tile.cols && bitmap.get(row, tile.start_col + c) {
                filled.push((c, r));
                c += 1;
            }
            let x = grid.x + run_start as f32 * cell;
            canvas.fill_rect(Rect::new(x, y, (c - run_start) as f32 * cell, cell), fill);
        }
    }

    if cross_marks && !filled.is_empty() {
        let inset = cell * 0.2;
        canvas.set_stroke_color(cross_mark_color(fill));
        canvas.set_line_width(cell * 0.08);
        for &(c, r) in &filled {
            let x0 = grid.x + c as f32 * cell + inset;
            let y0 = grid.y + r as f32 * cell + inset;
            let x1 = grid.x + (c + 1) as f32 * cell - inset;
            let y1 = grid.y + (r + 1) as f32 * cell - inset;
            canvas.segment(x0, y0, x1, y1);
            canvas.segment(x0, y1, x1, y0);
        }
        canvas.stroke();
    }
    filled.len()
}

fn is_major(absolute_index: usize) -> bool {
    absolute_index % MAJOR_LINE_INTERVAL == 0
}

fn draw_grid_lines(canvas: &mut PageCanvas, tile: &PageTile, grid: Rect, cell: f32) {
    // Thin lines first so major lines paint over them.
    canvas.set_stroke_color(THIN_LINE_COLOR);
    canvas.set_line_width(THIN_LINE_MM);
    for i in 1..tile.cols {
        if !is_major(tile.start_col + i) {
            let x = grid.x + i as f32 * cell;
            canvas.segment(x, grid.y, x, grid.bottom());
        }
    }
    for i in 1..tile.rows {
        if !is_major(tile.start_row + i) {
            let y = grid.y + i as f32 * cell;
            canvas.segment(grid.x, y, grid.right(), y);
        }
    }
    canvas.stroke();

    // Major lines follow absolute indices so they line up across pages.
    canvas.set_stroke_color(MAJOR_LINE_COLOR);
    canvas.set_line_width(MAJOR_LINE_MM);
    for i in 1..tile.cols {
        if is_major(tile.start_col + i) {
            let x = grid.x + i as f32 * cell;
            canvas.segment(x, grid.y, x, grid.bottom());
        }
    }
    for i in 1..tile.rows {
        if is_major(tile.start_row + i) {
            let y = grid.y + i as f32 * cell;
            canvas.segment(grid.x, y, grid.right(), y);
        }
    }
    canvas.stroke();

    canvas.stroke_rect(grid, MAJOR_LINE_COLOR, BORDER_LINE_MM);
}

/// Numbers every major column along the top edge and every major row along
/// the left edge, using absolute pattern coordinates. Index 0 is skipped.
fn draw_coordinate_labels(canvas: &mut PageCanvas, tile: &PageTile, grid: Rect, cell: f32) {
    let column_style = TextStyle::regular(LABEL_SIZE_PT, LABEL_COLOR).aligned(TextAlign::Center);
    for i in 0..=tile.cols {
        let absolute = tile.start_col + i;
        if absolute != 0 && is_major(absolute) {
            let x = grid.x + i as f32 * cell;
            canvas.text(x, grid.y - 1.0, &absolute.to_string(), column_style);
        }
    }

    let row_style = TextStyle::regular(LABEL_SIZE_PT, LABEL_COLOR).aligned(TextAlign::Right);
    for i in 0..=tile.rows {
        let absolute = tile.start_row + i;
        if absolute != 0 && is_major(absolute) {
            let y = grid.y + i as f32 * cell;
            canvas.text(grid.x - 0.8, y + 0.7, &absolute.to_string(), row_style);
        }
    }
}

/// A 10 mm reference bar with end ticks under the grid's bottom-right
/// corner. If it does not measure 10 mm on paper, the chart was scaled.
fn draw_scale_bar(canvas: &mut PageCanvas, ctx: &RenderContext, grid: Rect) {
    let instruction = ctx.localizer.tr(
        "grid.scale_check",
        "Scale check: this bar must measure exactly 10 mm",
    );
    let text_style = TextStyle::regular(SCALE_TEXT_SIZE_PT, Color::gray(60)).aligned(TextAlign::Right);
    let text_width = text_style.font.measure_mm(&instruction, SCALE_TEXT_SIZE_PT);

    // Narrow grids push the bar right so the instruction stays on the page.
    let min_right = grid.x + text_width + 2.0 + SCALE_BAR_LENGTH_MM;
    let right = grid.right().max(min_right);
    let left = right - SCALE_BAR_LENGTH_MM;
    let y = grid.bottom() + SCALE_BAR_GAP_MM;

    canvas.set_stroke_color(Color::BLACK);
    canvas.set_line_width(0.3);
    canvas.segment(left, y, right, y);
    canvas.segment(left, y - SCALE_TICK_MM, left, y + SCALE_TICK_MM);
    canvas.segment(right, y - SCALE_TICK_MM, right, y + SCALE_TICK_MM);
    canvas.stroke();

    canvas.text(
        (left + right) / 2.0,
        y - SCALE_TICK_MM - 0.6,
        "10 mm",
        TextStyle::bold(5.0, Color::BLACK).aligned(TextAlign::Center),
    );
    canvas.text(left - 2.0, y + 0.9, &instruction, text_style);
}
