use crate::font::FontDescriptor;

/// A rectangular grid of stitch cells, stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternBitmap {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl PatternBitmap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a bitmap from rows of `'0'`/`'1'` text. Short rows are padded
    /// with empty cells to the widest row.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut cells = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.bytes().enumerate() {
                cells[y * width + x] = cell == b'1';
            }
        }
        Self { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Out-of-range coordinates read as empty.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row * self.width + col]
    }

    pub fn column(&self, col: usize) -> Vec<bool> {
        (0..self.height).map(|row| self.get(row, col)).collect()
    }

    /// Number of filled cells, i.e. crosses to stitch.
    pub fn stitch_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Renders `text` through a pixel font into a stitch bitmap.
///
/// Characters are laid out left to right with `letter_spacing` blank columns
/// between them. Spaces and characters the font lacks become `space_width`
/// blank columns. Glyphs shorter than the font are bottom-aligned.
///
/// Empty text, a missing font, or a font without glyphs yield an empty bitmap.
pub fn compose(text: &str, font: Option<&FontDescriptor>) -> PatternBitmap {
    let Some(font) = font else {
        return PatternBitmap::empty();
    };
    if text.is_empty() || !font.has_glyphs() {
        return PatternBitmap::empty();
    }

    let height = font.effective_height();
    let mut columns: Vec<Vec<bool>> = Vec::new();

    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            for _ in 0..font.letter_spacing {
                columns.push(vec![false; height]);
            }
        }

        let glyph = if ch == ' ' { None } else { font.glyph(ch) };
        let Some(glyph) = glyph else {
            if ch != ' ' {
                log::debug!("No glyph for {:?} in font '{}', leaving a gap", ch, font.name);
            }
            for _ in 0..font.space_columns() {
                columns.push(vec![false; height]);
            }
            continue;
        };

        let offset = height.saturating_sub(glyph.row_count());
        for col in 0..glyph.width {
            let mut column = vec![false; height];
            for (row, cell) in column.iter_mut().enumerate().skip(offset) {
                *cell = glyph.is_set(row - offset, col);
            }
            columns.push(column);
        }
    }

    let width = columns.len();
    let mut cells = vec![false; width * height];
    for (x, column) in columns.iter().enumerate() {
        for (y, &filled) in column.iter().enumerate() {
            cells[y * width + x] = filled;
        }
    }
    PatternBitmap { width, height, cells }
}
