use crosspatch_types::Size;

/// Space reserved left of the grid for row coordinate labels.
pub const LABEL_MARGIN_LEFT_MM: f32 = 4.0;
/// Space reserved above the grid for column coordinate labels.
pub const LABEL_MARGIN_TOP_MM: f32 = 4.0;

/// How a pattern is split across pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPlan {
    pub cols_per_page: usize,
    pub rows_per_page: usize,
    pub pages_x: usize,
    pub pages_y: usize,
    pub total_pages: usize,
    pub label_margin_left: f32,
    pub label_margin_top: f32,
}

/// The slice of the pattern drawn on one grid page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTile {
    /// Zero-based position in row-major page order.
    pub index: usize,
    pub page_x: usize,
    pub page_y: usize,
    pub start_col: usize,
    pub start_row: usize,
    /// Columns actually drawn, clipped to the pattern width.
    pub cols: usize,
    /// Rows actually drawn, clipped to the pattern height.
    pub rows: usize,
}

/// Computes the pagination plan for a `pattern_width` × `pattern_height`
/// cell grid with square cells of `cell_size_mm`, on pages whose usable
/// area is `usable`.
///
/// At least one column and one row always fit per page, even when a single
/// cell is larger than the page.
pub fn plan_pages(
    pattern_width: usize,
    pattern_height: usize,
    cell_size_mm: f32,
    usable: Size,
) -> LayoutPlan {
    let cols_per_page = cells_that_fit(usable.width - LABEL_MARGIN_LEFT_MM, cell_size_mm);
    let rows_per_page = cells_that_fit(usable.height - LABEL_MARGIN_TOP_MM, cell_size_mm);

    let pages_x = pattern_width.div_ceil(cols_per_page).max(1);
    let pages_y = pattern_height.div_ceil(rows_per_page).max(1);

    log::debug!(
        "Planned {}x{} cells at {:.3} mm: {} cols x {} rows per page, {}x{} pages",
        pattern_width,
        pattern_height,
        cell_size_mm,
        cols_per_page,
        rows_per_page,
        pages_x,
        pages_y
    );

    LayoutPlan {
        cols_per_page,
        rows_per_page,
        pages_x,
        pages_y,
        total_pages: pages_x * pages_y,
        label_margin_left: LABEL_MARGIN_LEFT_MM,
        label_margin_top: LABEL_MARGIN_TOP_MM,
    }
}

fn cells_that_fit(available_mm: f32, cell_size_mm: f32) -> usize {
    let count = (available_mm / cell_size_mm).floor();
    if count.is_finite() && count >= 1.0 {
        count as usize
    } else {
        1
    }
}

impl LayoutPlan {
    /// Iterates the page tiles row-major: left to right, then top to bottom.
    pub fn tiles(&self, pattern_width: usize, pattern_height: usize) -> Tiles {
        Tiles {
            plan: *self,
            pattern_width,
            pattern_height,
            next: 0,
        }
    }
}

pub struct Tiles {
    plan: LayoutPlan,
    pattern_width: usize,
    pattern_height: usize,
    next: usize,
}

impl Iterator for Tiles {
    type Item = PageTile;

    fn next(&mut self) -> Option<PageTile> {
        if self.next >= self.plan.total_pages {
            return None;
        }
        let index = self.next;
        self.next += 1;

        let page_x = index % self.plan.pages_x;
        let page_y = index / self.plan.pages_x;
        let start_col = page_x * self.plan.cols_per_page;
        let start_row = page_y * self.plan.rows_per_page;
        Some(PageTile {
            index,
            page_x,
            page_y,
            start_col,
            start_row,
            cols: self
                .plan
                .cols_per_page
                .min(self.pattern_width.saturating_sub(start_col)),
            rows: self
                .plan
                .rows_per_page
                .min(self.pattern_height.saturating_sub(start_row)),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.total_pages - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Tiles {}

#[cfg(test)]
mod tests {
    use super::*;

    const AIDA_14_CELL_MM: f32 = 25.4 / 14.0;

    #[test]
    fn wide_pattern_on_a4_portrait() {
        let plan = plan_pages(200, 100, AIDA_14_CELL_MM, Size::new(175.0, 247.0));
        assert_eq!(plan.cols_per_page, 94);
        // (247 - 4) / (25.4 / 14) = 133.9
        assert_eq!(plan.rows_per_page, 133);
        assert_eq!(plan.pages_x, 3);
        assert_eq!(plan.pages_y, 1);
        assert_eq!(plan.total_pages, 3);
    }

    #[test]
    fn oversized_cells_still_fit_one_per_page() {
        let plan = plan_pages(5, 5, 500.0, Size::new(175.0, 247.0));
        assert_eq!(plan.cols_per_page, 1);
        assert_eq!(plan.rows_per_page, 1);
        assert_eq!(plan.total_pages, 25);
    }

    #[test]
    fn degenerate_inputs_never_yield_zero() {
        for cell in [0.0, -1.0, f32::NAN, f32::INFINITY, 1e9] {
            let plan = plan_pages(3, 2, cell, Size::new(10.0, 2.0));
            assert!(plan.cols_per_page >= 1);
            assert!(plan.rows_per_page >= 1);
            assert_eq!(plan.total_pages, plan.pages_x * plan.pages_y);
        }
    }

    #[test]
    fn total_is_product_of_axes() {
        for (w, h) in [(1, 1), (95, 300), (1000, 7), (0, 0)] {
            let plan = plan_pages(w, h, AIDA_14_CELL_MM, Size::new(175.0, 247.0));
            assert_eq!(plan.total_pages, plan.pages_x * plan.pages_y);
        }
    }

    #[test]
    fn tiles_are_row_major_and_clipped() {
        let plan = plan_pages(200, 300, AIDA_14_CELL_MM, Size::new(175.0, 247.0));
        let tiles: Vec<PageTile> = plan.tiles(200, 300).collect();
        assert_eq!(tiles.len(), plan.total_pages);
        assert_eq!((tiles[0].page_x, tiles[0].page_y), (0, 0));
        assert_eq!((tiles[1].page_x, tiles[1].page_y), (1, 0));
        assert_eq!(tiles[plan.pages_x].page_y, 1);

        let last_col = &tiles[plan.pages_x - 1];
        assert_eq!(last_col.start_col + last_col.cols, 200);
        let covered: usize = tiles.iter().map(|t| t.cols * t.rows).sum();
        assert_eq!(covered, 200 * 300);
    }
}
